//! rowsearch library - paginated substring search over a single table
//!
//! The searchable table is discovered at startup; requests are stateless
//! and read-only, sharing nothing but the connection pool.

use axum::Router;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod pagination;

use db::RowStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only access to the discovered table
    pub store: RowStore,
}

impl AppState {
    /// Create new application state
    pub fn new(store: RowStore) -> Self {
        Self { store }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::search))
        .merge(api::health_routes())
        .with_state(state)
        // Browser clients may call from any origin
        .layer(CorsLayer::permissive())
}
