//! Substring search endpoint returning paginated JSON results
//! with a pre-rendered navigation page bar.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::db::ResultRow;
use crate::pagination::{effective_page_size, page_links, paginate, PageLink, PageWindow};
use crate::AppState;

/// Query parameters for the search endpoint.
///
/// `page` and `pagelimit` arrive as raw strings and are parsed leniently:
/// unparsable values behave exactly like absent ones.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Substring to search for (required, non-empty)
    #[serde(default)]
    pub text: String,

    /// Requested page, 1-indexed
    pub page: Option<String>,

    /// Requested rows per page
    pub pagelimit: Option<String>,
}

/// Search response payload
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Number of rows in this page (not the overall total)
    #[serde(rename = "foundRows")]
    pub found_rows: usize,
    /// Total number of matching rows
    pub total: i64,
    pub items: Vec<ResultRow>,
    /// Navigation page bar
    pub links: Vec<PageLink>,
    pub filters: Filters,
}

#[derive(Debug, Serialize)]
pub struct Filters {
    /// Current page, 1-indexed
    pub page: i64,
    /// Next page, 1-indexed; null on the last page
    pub nextpage: Option<i64>,
}

impl SearchResponse {
    /// Assemble the payload from the fetched page and its window.
    ///
    /// The next-page field is derived from the window alone, never by
    /// scanning the page bar (ellipsis entries are not pages).
    pub fn assemble(window: PageWindow, items: Vec<ResultRow>) -> Self {
        let nextpage = if window.current_page + 1 < window.total_pages {
            Some(window.current_page + 2)
        } else {
            None
        };

        Self {
            found_rows: items.len(),
            total: window.total_items,
            items,
            links: page_links(window.total_pages, window.current_page),
            filters: Filters {
                page: window.current_page + 1,
                nextpage,
            },
        }
    }
}

/// GET /?text=needle&page=2&pagelimit=50
///
/// Counts the matching rows, clamps the requested page against that count,
/// then fetches the one window the clamped offset selects.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, SearchError> {
    if params.text.is_empty() {
        return Err(SearchError::MissingText);
    }

    let page_size = effective_page_size(parse_lenient(params.pagelimit.as_deref()));
    let requested_page = parse_lenient(params.page.as_deref());

    let total = state
        .store
        .count(&params.text)
        .await
        .map_err(SearchError::store)?;

    let window = paginate(total, page_size, requested_page);

    let items = state
        .store
        .fetch_page(&params.text, window.page_size, window.offset)
        .await
        .map_err(SearchError::store)?;

    Ok(Json(SearchResponse::assemble(window, items)))
}

/// Parse an optional integer parameter, treating garbage as absent
fn parse_lenient(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.parse().ok())
}

/// Search endpoint errors
#[derive(Debug)]
pub enum SearchError {
    MissingText,
    Store(String),
}

impl SearchError {
    fn store(err: crate::error::Error) -> Self {
        warn!("Store query failed: {}", err);
        SearchError::Store(err.to_string())
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            SearchError::MissingText => (
                StatusCode::BAD_REQUEST,
                "text parameter required".to_string(),
            ),
            SearchError::Store(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "status": "error",
            "message": message,
        }));

        (status, body).into_response()
    }
}
