//! Session endpoints: the login/logout side of the credential, plus the
//! current viewer.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{error, success, ApiResult};
use crate::errors::ForumError;
use crate::models::Viewer;
use crate::repository::Mode;
use crate::store::VIEWER_KEY;
use crate::AppState;

/// Request body carrying a personal access token.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    /// `owner/repo` the board is scoped to
    pub repository: String,
    pub mode: Mode,
    pub authenticated: bool,
    /// Login of the last profile verified through `/api/viewer`
    pub login: Option<String>,
}

async fn status(state: &AppState, mode: Mode) -> SessionStatus {
    let viewer: Option<Viewer> = state.storage.get(VIEWER_KEY, None).await;

    SessionStatus {
        repository: format!("{}/{}", state.config.owner, state.config.repo),
        mode,
        authenticated: mode == Mode::Live,
        login: viewer.map(|v| v.login),
    }
}

/// GET /api/session
pub async fn get_session(State(state): State<AppState>) -> ApiResult<SessionStatus> {
    let mode = state.repo.mode().await;
    success(status(&state, mode).await, mode)
}

/// PUT /api/session - Store a personal access token.
pub async fn set_session(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> ApiResult<SessionStatus> {
    if request.token.trim().is_empty() {
        let mode = state.repo.mode().await;
        return error(ForumError::BadRequest("Token is required".to_string()), mode);
    }

    if !state.storage.store_credential(&request.token).await {
        let mode = state.repo.mode().await;
        return error(
            ForumError::Storage("Failed to store token".to_string()),
            mode,
        );
    }

    tracing::info!("Access token stored, switching to live mode");
    let mode = state.repo.mode().await;
    success(status(&state, mode).await, mode)
}

/// DELETE /api/session - Log out.
pub async fn clear_session(State(state): State<AppState>) -> ApiResult<SessionStatus> {
    if !state.storage.clear_credential().await {
        let mode = state.repo.mode().await;
        return error(
            ForumError::Storage("Failed to clear token".to_string()),
            mode,
        );
    }

    let mode = state.repo.mode().await;
    success(status(&state, mode).await, mode)
}

/// GET /api/viewer - The signed-in user, or null.
///
/// A rejected token is cleared, so the reported mode may already be `guest`.
pub async fn get_viewer(State(state): State<AppState>) -> ApiResult<Option<Viewer>> {
    let viewer = state.repo.current_user().await;
    let mode = state.repo.mode().await;
    success(viewer, mode)
}
