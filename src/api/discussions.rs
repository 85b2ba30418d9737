//! Discussion read endpoints.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use super::{error, page_size, success, ApiResult};
use crate::view::{DiscussionView, PageView, Renderer};
use crate::AppState;

/// Paging parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub first: Option<u32>,
    /// Cursor from a previous page's `nextCursor`
    #[serde(default)]
    pub after: Option<String>,
}

/// GET /api/discussions - One page of discussions as cards.
///
/// In guest mode this is always the full snapshot with `hasNextPage: false`.
pub async fn list_discussions(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> ApiResult<PageView> {
    let backend = state.repo.dispatch().await;
    let mode = backend.mode();

    match backend.list_discussions(page_size(params.first), params.after.as_deref())
        .await
    {
        Ok(page) => success(Renderer::new().page(&page), mode),
        Err(e) => error(e, mode),
    }
}

/// GET /api/discussions/:number - One discussion with its comments.
pub async fn get_discussion(
    State(state): State<AppState>,
    Path(number): Path<i64>,
) -> ApiResult<DiscussionView> {
    let backend = state.repo.dispatch().await;
    let mode = backend.mode();

    match backend.get_discussion(number).await {
        Ok(discussion) => success(Renderer::new().detail(&discussion), mode),
        Err(e) => error(e, mode),
    }
}
