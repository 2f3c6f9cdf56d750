//! Request-level error handling for the Folio HTTP layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Errors a request handler can surface to the caller. Every variant maps
/// to the uniform `{"status": "error", "message": ...}` envelope.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Create a validation error (maps to 422).
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not-found error (maps to 404).
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ApiError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            let error_id = Uuid::new_v4();
            tracing::error!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                %message,
                "request failed"
            );
        }

        let body = json!({
            "status": "error",
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn validation_error_maps_to_422() {
        let error = ApiError::validation("The title field is required.");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn not_found_error_maps_to_404() {
        let error = ApiError::not_found("Book not found");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_error_maps_to_500() {
        let error = ApiError::Internal(anyhow::anyhow!("database connection failed"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn sqlx_errors_become_internal() {
        let error: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, ApiError::Internal(_)));
    }

    #[test]
    fn error_message_is_preserved() {
        let error = ApiError::not_found("Book not found");
        assert_eq!(error.to_string(), "Book not found");
    }
}
