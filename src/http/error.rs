//! Client-facing error responses.
//!
//! Every handler failure is an `ApiError`, rendered as
//! `{"detail": "<message>"}` with the matching status code.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::choices::ChoiceLogError;
use crate::segments::RetentionOption;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown customer, or no choice recorded yet.
    #[error("{0}")]
    NotFound(String),

    /// Selected option is not offered to the customer's segment.
    #[error("Invalid option for segment '{segment}'. Allowed: [{}]", join_options(.allowed))]
    InvalidOption {
        segment: String,
        allowed: &'static [RetentionOption],
    },

    /// The customer dataset is not available to this server.
    #[error("{0}")]
    InternalUnavailable(String),

    /// Reading or writing the choice log failed.
    #[error("{0}")]
    Storage(String),

    /// Path or body could not be decoded into the expected type.
    #[error("{0}")]
    Unprocessable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidOption { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalUnavailable(_) | ApiError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ChoiceLogError> for ApiError {
    fn from(err: ChoiceLogError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

fn join_options(options: &[RetentionOption]) -> String {
    options
        .iter()
        .map(|o| o.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::allowed_options;

    #[test]
    fn test_invalid_option_message_lists_allowed() {
        let err = ApiError::InvalidOption {
            segment: "High".into(),
            allowed: allowed_options("High"),
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Invalid option for segment 'High'. Allowed: [Cashback, Gift, Lucky Draw, Save Points]"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InternalUnavailable("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let storage: ApiError = ChoiceLogError::Missing("choice_log.csv".into()).into();
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            ApiError::Unprocessable("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
