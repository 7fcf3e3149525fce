//! Error types for the webhook API surface.
//!
//! Dispatcher-side failures never pass through here: delivery errors are
//! terminal and logged-only. These errors are the synchronous responses of
//! the registry endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use docbin_core::DocbinError;
use serde::Serialize;
use utoipa::ToSchema;

/// Webhook API error variants.
#[derive(Debug, thiserror::Error)]
pub enum WebhookApiError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("missing webhook url")]
    MissingUrl,

    #[error("missing webhook secret")]
    MissingSecret,

    #[error("missing webhook events")]
    MissingEvents,

    #[error("missing url, secret or events")]
    MissingUpdateFields,

    #[error("unknown webhook event: {0}")]
    UnknownEventType(String),

    #[error("missing {0} permission")]
    PermissionDenied(&'static str),

    #[error("webhook not found")]
    NotFound,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl WebhookApiError {
    /// Collapse into the workspace-wide error taxonomy
    /// (bad request / forbidden / not found / internal).
    #[must_use]
    pub fn taxonomy(&self) -> DocbinError {
        match self {
            Self::Database(e) => DocbinError::Internal {
                message: e.to_string(),
            },
            Self::MissingUrl
            | Self::MissingSecret
            | Self::MissingEvents
            | Self::MissingUpdateFields
            | Self::UnknownEventType(_) => DocbinError::BadRequest {
                message: self.to_string(),
            },
            Self::PermissionDenied(permission) => DocbinError::Forbidden {
                permission: (*permission).to_string(),
            },
            Self::NotFound => DocbinError::NotFound {
                resource: "Webhook".to_string(),
                id: None,
            },
            Self::Internal(message) => DocbinError::Internal {
                message: message.clone(),
            },
        }
    }
}

/// JSON error response returned by webhook API endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status: u16,
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match self.taxonomy() {
            DocbinError::BadRequest { .. } => (StatusCode::BAD_REQUEST, "bad_request"),
            DocbinError::Forbidden { .. } => (StatusCode::FORBIDDEN, "forbidden"),
            DocbinError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            DocbinError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, WebhookApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_request() {
        for err in [
            WebhookApiError::MissingUrl,
            WebhookApiError::MissingSecret,
            WebhookApiError::MissingEvents,
            WebhookApiError::MissingUpdateFields,
            WebhookApiError::UnknownEventType("created".to_string()),
        ] {
            assert!(matches!(err.taxonomy(), DocbinError::BadRequest { .. }));
        }
    }

    #[test]
    fn test_permission_denied_is_forbidden() {
        let err = WebhookApiError::PermissionDenied("webhook");
        assert!(matches!(
            err.taxonomy(),
            DocbinError::Forbidden { permission } if permission == "webhook"
        ));
    }

    #[test]
    fn test_not_found_taxonomy() {
        assert!(matches!(
            WebhookApiError::NotFound.taxonomy(),
            DocbinError::NotFound { .. }
        ));
    }

    #[test]
    fn test_database_error_is_internal() {
        let err = WebhookApiError::Database(sqlx::Error::RowNotFound);
        assert!(matches!(err.taxonomy(), DocbinError::Internal { .. }));
    }
}
