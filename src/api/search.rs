//! Search endpoint.

use axum::extract::{Query, State};
use serde::Deserialize;

use super::{error, page_size, success, ApiResult};
use crate::view::{Renderer, SearchView};
use crate::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Search text. Blank is rejected in live mode and matches all in guest mode.
    #[serde(default)]
    pub q: String,
    /// Maximum number of results (default: 20).
    #[serde(default)]
    pub limit: Option<u32>,
}

/// GET /api/search - Search discussion titles and bodies.
pub async fn search_discussions(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<SearchView> {
    let backend = state.repo.dispatch().await;
    let mode = backend.mode();

    match backend.search(&params.q, page_size(params.limit)).await {
        Ok(results) => success(Renderer::new().search(&results), mode),
        Err(e) => error(e, mode),
    }
}
