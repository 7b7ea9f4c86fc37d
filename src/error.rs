//! Error types for rowsearch

use thiserror::Error;

/// Result type for store and startup operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Count or fetch query failed (wraps sqlx::Error); surfaced to the
    /// client as an error payload, never retried
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Backing store unusable at process start; fatal
    #[error("Startup error: {0}")]
    Startup(String),
}
