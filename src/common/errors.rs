use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    common::types::PartyId,
    playback::{SongError, clock::now_ms},
};

/// Caller-facing failures of the dispatch layer.
///
/// Only input problems and unknown parties are errors. Empty queues,
/// seeks without a song and out-of-range offsets are absorbed by the
/// player itself and never show up here.
#[derive(Debug, Error)]
pub enum PartyError {
    #[error("invalid {name}: {reason}")]
    InvalidInput { name: &'static str, reason: String },

    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid song descriptor: {0}")]
    InvalidSong(#[from] SongError),

    #[error("party not found: {0}")]
    NotFound(PartyId),
}

impl PartyError {
    pub fn invalid(name: &'static str, reason: impl ToString) -> Self {
        Self::InvalidInput {
            name,
            reason: reason.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidInput { .. } | Self::MissingParameter(_) | Self::InvalidSong(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// Converts into the JSON error body for the request at `path`.
    pub fn at(self, path: impl Into<String>) -> ApiError {
        ApiError::new(self.status(), self.to_string(), path)
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,
    /// HTTP status code.
    pub status: u16,
    /// HTTP status reason phrase (e.g. "Bad Request").
    pub error: String,
    /// Human-readable error message.
    pub message: String,
    /// The request path that caused the error.
    pub path: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            timestamp: now_ms(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").into(),
            message: message.into(),
            path: path.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_caller_facing_statuses() {
        assert_eq!(
            PartyError::NotFound(PartyId(7)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PartyError::MissingParameter("seek-time").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PartyError::from(SongError::EmptyId).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn api_error_carries_reason_phrase_and_path() {
        let body = PartyError::invalid("party-id", "not a number").at("/musicPlayer");
        assert_eq!(body.status, 400);
        assert_eq!(body.error, "Bad Request");
        assert_eq!(body.path, "/musicPlayer");
        assert_eq!(body.message, "invalid party-id: not a number");
    }
}
