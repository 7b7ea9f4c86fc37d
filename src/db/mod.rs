//! Database access layer: table discovery and windowed substring search.
//!
//! The backing table is not fixed by a schema. It is discovered at startup
//! (first user table in the database) and its rows are decoded dynamically,
//! preserving whatever columns the table happens to have.

use serde_json::{json, Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool, ValueRef};
use tracing::info;

use crate::error::{Error, Result};

/// The designated searchable column; discovery verifies it exists
pub const TEXT_COLUMN: &str = "text";

/// One result row: column name to value, in the table's column order
pub type ResultRow = Map<String, Value>;

/// Read-only access to the discovered table
#[derive(Clone)]
pub struct RowStore {
    pool: SqlitePool,
    table: String,
}

impl RowStore {
    /// Discover the backing table and verify it is searchable.
    ///
    /// Takes the first user table in the database. Fails when the database
    /// has no tables or the table lacks a `text` column, so a misconfigured
    /// store is rejected at startup rather than on the first query.
    pub async fn discover(pool: SqlitePool) -> Result<Self> {
        let table: Option<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name LIMIT 1",
        )
        .fetch_optional(&pool)
        .await?;

        let table = match table {
            Some(name) => name,
            None => return Err(Error::Startup("database contains no tables".to_string())),
        };

        let columns = table_columns(&pool, &table).await?;
        if !columns.iter().any(|c| c == TEXT_COLUMN) {
            return Err(Error::Startup(format!(
                "table '{}' has no '{}' column",
                table, TEXT_COLUMN
            )));
        }

        info!("Using table: {}", table);
        Ok(Self { pool, table })
    }

    /// Name of the discovered table
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Number of rows whose text column contains `needle` as a substring
    pub async fn count(&self, needle: &str) -> Result<i64> {
        let total = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM \"{}\" WHERE {} LIKE ?",
            self.table, TEXT_COLUMN
        ))
        .bind(like_pattern(needle))
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// One window of matching rows, ordered by id ascending.
    ///
    /// Returns an empty Vec (never an error) when nothing matches.
    pub async fn fetch_page(
        &self,
        needle: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ResultRow>> {
        let rows = sqlx::query(&format!(
            "SELECT * FROM \"{}\" WHERE {} LIKE ? ORDER BY id ASC LIMIT ? OFFSET ?",
            self.table, TEXT_COLUMN
        ))
        .bind(like_pattern(needle))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(decode_row).collect())
    }
}

fn like_pattern(needle: &str) -> String {
    format!("%{}%", needle)
}

/// Column names for a table, in declaration order
async fn table_columns(pool: &SqlitePool, table: &str) -> Result<Vec<String>> {
    let rows = sqlx::query(&format!("PRAGMA table_info(\"{}\")", table))
        .fetch_all(pool)
        .await?;

    // PRAGMA table_info returns: (cid, name, type, notnull, dflt_value, pk)
    Ok(rows.iter().map(|row| row.get::<String, _>(1)).collect())
}

fn decode_row(row: &SqliteRow) -> ResultRow {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| (col.name().to_string(), decode_value(row, i)))
        .collect()
}

/// Convert one SQLite value to JSON (string, integer, float, or null)
fn decode_value(row: &SqliteRow, i: usize) -> Value {
    match row.try_get_raw(i) {
        Ok(raw) if raw.is_null() => Value::Null,
        Ok(_) => row
            .try_get::<String, _>(i)
            .ok()
            .map(Value::String)
            .or_else(|| row.try_get::<i64, _>(i).ok().map(|v| json!(v)))
            .or_else(|| row.try_get::<f64, _>(i).ok().map(|v| json!(v)))
            .unwrap_or(Value::Null),
        Err(_) => Value::Null,
    }
}
