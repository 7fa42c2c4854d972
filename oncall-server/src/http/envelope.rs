//! Uniform response envelope
//!
//! Every response body, success or error, has the shape
//! `{"status": "success" | "error", "message": ..., "data": ...}`.
//! Handlers return exactly one `Envelope` (or an `ApiError`, which renders
//! into one), so a request can never emit two bodies.

use std::borrow::Cow;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Default message for successful reads
pub const SUCCESS: &str = "Success";

/// Response envelope with HTTP status
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    #[serde(skip)]
    code: StatusCode,
    status: &'static str,
    message: Cow<'static, str>,
    data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Envelope with an explicit status code and message.
    pub fn send(data: T, code: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            status: status_for(code),
            message: message.into(),
            data: Some(data),
        }
    }

    /// 200 with the default "Success" message.
    pub fn ok(data: T) -> Self {
        Self::send(data, StatusCode::OK, SUCCESS)
    }

    /// 201 with a resource-specific message.
    pub fn created(data: T, message: impl Into<Cow<'static, str>>) -> Self {
        Self::send(data, StatusCode::CREATED, message)
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

impl Envelope<()> {
    /// 200 with `data: null`.
    pub fn message_only(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: StatusCode::OK,
            status: status_for(StatusCode::OK),
            message: message.into(),
            data: None,
        }
    }

    /// Error envelope with `data: null`.
    pub fn error(code: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            status: status_for(code),
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}

/// "success" below 400, "error" otherwise.
pub fn status_for(code: StatusCode) -> &'static str {
    if code.as_u16() < 400 {
        "success"
    } else {
        "error"
    }
}

/// Body of a create response
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CreatedId {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn status_boundary() {
        assert_eq!(status_for(StatusCode::OK), "success");
        assert_eq!(status_for(StatusCode::PERMANENT_REDIRECT), "success");
        assert_eq!(status_for(StatusCode::BAD_REQUEST), "error");
        assert_eq!(status_for(StatusCode::INTERNAL_SERVER_ERROR), "error");
    }

    #[tokio::test]
    async fn ok_envelope_shape() {
        let response = Envelope::ok(vec![1, 2]).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"status": "success", "message": "Success", "data": [1, 2]})
        );
    }

    #[tokio::test]
    async fn created_envelope_shape() {
        let response = Envelope::created(CreatedId { id: 7 }, "Doctor created successfully")
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({
                "status": "success",
                "message": "Doctor created successfully",
                "data": {"id": 7}
            })
        );
    }

    #[tokio::test]
    async fn error_envelope_has_null_data() {
        let response = Envelope::error(StatusCode::NOT_FOUND, "Doctor not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"status": "error", "message": "Doctor not found", "data": null})
        );
    }

    #[tokio::test]
    async fn message_only_is_success_with_null_data() {
        let response = Envelope::message_only("Doctor deleted successfully").into_response();
        assert_eq!(
            body_json(response).await,
            json!({"status": "success", "message": "Doctor deleted successfully", "data": null})
        );
    }
}
