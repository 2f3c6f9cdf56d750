//! Uniform JSON response envelopes.
//!
//! Every success response is either `{"status": "success", "data": ...}`
//! or `{"status": "success", "message": ...}`; the error side lives in
//! [`crate::error`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success envelope carrying a payload.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    status: &'static str,
    data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Success envelope carrying only a human-readable message.
#[derive(Debug, Serialize)]
pub struct MessageEnvelope {
    status: &'static str,
    message: String,
}

impl MessageEnvelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

impl IntoResponse for MessageEnvelope {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_envelope_serializes_status_and_data() {
        let envelope = Envelope::success(vec![1, 2, 3]);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn message_envelope_serializes_status_and_message() {
        let envelope = MessageEnvelope::success("Book deleted successfully");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["message"], "Book deleted successfully");
    }

    #[test]
    fn envelope_responds_with_200() {
        let response = Envelope::success("payload").into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
