//! Error-to-HTTP response conversion.
//!
//! Every failure leaves the API as `{"detail": "<text>"}` so clients see the
//! same shape for validation, not-found and engine errors.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::playlist::PlaylistError;

#[derive(Debug)]
pub enum ApiError {
    /// Request body rejected before any handler logic ran
    Validation { status: StatusCode, detail: String },
    Playlist(PlaylistError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { status, .. } => *status,
            Self::Playlist(PlaylistError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Playlist(PlaylistError::Engine(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Self::Validation { detail, .. } => detail.clone(),
            Self::Playlist(e) => e.to_string(),
        }
    }
}

impl From<PlaylistError> for ApiError {
    fn from(e: PlaylistError) -> Self {
        Self::Playlist(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ref other => other.status(),
        };

        Self::Validation {
            status,
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %detail, "Server error in API handler");
        } else {
            tracing::debug!(status = %status, detail = %detail, "Request rejected");
        }

        (status, axum::Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::DownloadError;

    #[test]
    fn not_found_produces_404() {
        let err = ApiError::from(PlaylistError::NotFound("Playlist not found"));
        assert_eq!(err.detail(), "Playlist not found");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_error_produces_500_with_text() {
        let err = ApiError::from(PlaylistError::from(DownloadError::ExecutionError(
            "yt-dlp crashed".into(),
        )));
        assert_eq!(err.detail(), "Execution error: yt-dlp crashed");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_keeps_status_and_detail() {
        let err = ApiError::Validation {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: "url: relative URL without a base".to_string(),
        };
        assert_eq!(err.detail(), "url: relative URL without a base");
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
