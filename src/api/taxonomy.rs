//! Category and label endpoints.

use axum::extract::State;

use super::{error, success, ApiResult};
use crate::models::{Category, Label};
use crate::AppState;

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let backend = state.repo.dispatch().await;
    let mode = backend.mode();

    match backend.list_categories().await {
        Ok(categories) => success(categories, mode),
        Err(e) => error(e, mode),
    }
}

/// GET /api/labels
pub async fn list_labels(State(state): State<AppState>) -> ApiResult<Vec<Label>> {
    let backend = state.repo.dispatch().await;
    let mode = backend.mode();

    match backend.list_labels().await {
        Ok(labels) => success(labels, mode),
        Err(e) => error(e, mode),
    }
}
