//! Write endpoints. All of them need a stored credential.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{error, success, ApiResult};
use crate::errors::ForumError;
use crate::models::{
    AppliedLabels, CommentRef, CreatedDiscussion, NewDiscussion, PinState, Reaction,
    ReactionContent,
};
use crate::repository::Mode;
use crate::AppState;

/// Request body for adding a comment.
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub body: String,
}

/// Request body for adding labels.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelsRequest {
    #[serde(default)]
    pub label_ids: Vec<String>,
}

/// Reaction selector; defaults to THUMBS_UP.
#[derive(Debug, Deserialize)]
pub struct ReactionQuery {
    #[serde(default)]
    pub content: Option<String>,
}

impl ReactionQuery {
    fn content(&self) -> Result<ReactionContent, ForumError> {
        match &self.content {
            None => Ok(ReactionContent::default()),
            Some(raw) => ReactionContent::parse(raw)
                .ok_or_else(|| ForumError::BadRequest(format!("Unknown reaction: {}", raw))),
        }
    }
}

/// Refuse guests before the request itself is validated.
fn require_live(mode: Mode, operation: &str) -> Result<(), ForumError> {
    match mode {
        Mode::Live => Ok(()),
        Mode::Guest => Err(ForumError::auth_required(operation)),
    }
}

/// POST /api/discussions - Create a discussion.
pub async fn create_discussion(
    State(state): State<AppState>,
    Json(request): Json<NewDiscussion>,
) -> ApiResult<CreatedDiscussion> {
    let backend = state.repo.dispatch().await;
    let mode = backend.mode();

    if let Err(e) = require_live(mode, "createDiscussion") {
        return error(e, mode);
    }

    if request.title.trim().is_empty() {
        return error(ForumError::BadRequest("Title is required".to_string()), mode);
    }
    if request.category_id.trim().is_empty() {
        return error(
            ForumError::BadRequest("Category (categoryId) is required".to_string()),
            mode,
        );
    }

    match backend.create_discussion(&request).await {
        Ok(created) => {
            tracing::info!("Created discussion #{}", created.number);
            success(created, mode)
        }
        Err(e) => error(e, mode),
    }
}

/// POST /api/nodes/:id/comments - Comment on a discussion.
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CommentRequest>,
) -> ApiResult<CommentRef> {
    let backend = state.repo.dispatch().await;
    let mode = backend.mode();

    if let Err(e) = require_live(mode, "addComment") {
        return error(e, mode);
    }

    if request.body.trim().is_empty() {
        return error(ForumError::BadRequest("Comment body is required".to_string()), mode);
    }

    match backend.add_comment(&id, &request.body).await {
        Ok(comment) => success(comment, mode),
        Err(e) => error(e, mode),
    }
}

/// POST /api/nodes/:id/reactions - React to a discussion or comment.
pub async fn add_reaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ReactionQuery>,
) -> ApiResult<Reaction> {
    let backend = state.repo.dispatch().await;
    let mode = backend.mode();

    if let Err(e) = require_live(mode, "react") {
        return error(e, mode);
    }

    let content = match params.content() {
        Ok(content) => content,
        Err(e) => return error(e, mode),
    };

    tracing::debug!("Adding {} reaction to {}", content.as_str(), id);
    match backend.react(&id, content).await {
        Ok(reaction) => success(reaction, mode),
        Err(e) => error(e, mode),
    }
}

/// DELETE /api/nodes/:id/reactions - Withdraw a reaction.
pub async fn remove_reaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ReactionQuery>,
) -> ApiResult<Reaction> {
    let backend = state.repo.dispatch().await;
    let mode = backend.mode();

    if let Err(e) = require_live(mode, "unreact") {
        return error(e, mode);
    }

    let content = match params.content() {
        Ok(content) => content,
        Err(e) => return error(e, mode),
    };

    tracing::debug!("Removing {} reaction from {}", content.as_str(), id);
    match backend.unreact(&id, content).await {
        Ok(reaction) => success(reaction, mode),
        Err(e) => error(e, mode),
    }
}

/// POST /api/nodes/:id/pin
pub async fn pin_discussion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PinState> {
    let backend = state.repo.dispatch().await;
    let mode = backend.mode();

    match backend.pin(&id).await {
        Ok(pin) => success(pin, mode),
        Err(e) => error(e, mode),
    }
}

/// DELETE /api/nodes/:id/pin
pub async fn unpin_discussion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PinState> {
    let backend = state.repo.dispatch().await;
    let mode = backend.mode();

    match backend.unpin(&id).await {
        Ok(pin) => success(pin, mode),
        Err(e) => error(e, mode),
    }
}

/// POST /api/nodes/:id/labels - Attach labels to a discussion.
pub async fn add_labels(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<LabelsRequest>,
) -> ApiResult<AppliedLabels> {
    let backend = state.repo.dispatch().await;
    let mode = backend.mode();

    if let Err(e) = require_live(mode, "addLabels") {
        return error(e, mode);
    }

    if request.label_ids.is_empty() {
        return error(ForumError::BadRequest("No labels provided".to_string()), mode);
    }

    match backend.add_labels(&id, &request.label_ids).await {
        Ok(labels) => success(labels, mode),
        Err(e) => error(e, mode),
    }
}
