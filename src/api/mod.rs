//! JSON API module.
//!
//! Exposes the repository and the view renderer over HTTP. Every response
//! reports the mode (`live` or `guest`) the request was served in.

mod discussions;
mod mutations;
mod search;
mod session;
mod taxonomy;

pub use discussions::*;
pub use mutations::*;
pub use search::*;
pub use session::*;
pub use taxonomy::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::{ForumError, ForumErrorWithMode};
use crate::repository::Mode;

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page GitHub serves in one request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub mode: Mode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, mode: Mode) -> Self {
        Self {
            success: true,
            data,
            mode,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, ForumErrorWithMode>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, mode: Mode) -> ApiResult<T> {
    Ok(ApiResponse::new(data, mode))
}

/// Create an error API response.
pub fn error<T: Serialize>(err: ForumError, mode: Mode) -> ApiResult<T> {
    Err(ForumErrorWithMode { error: err, mode })
}

/// Clamp a requested page size or search limit into `1..=MAX_PAGE_SIZE`.
pub fn page_size(requested: Option<u32>) -> u32 {
    requested
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_clamp() {
        assert_eq!(page_size(None), 20);
        assert_eq!(page_size(Some(0)), 1);
        assert_eq!(page_size(Some(50)), 50);
        assert_eq!(page_size(Some(500)), 100);
    }
}
