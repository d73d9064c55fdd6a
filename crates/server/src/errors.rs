use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use service::auth::errors::AuthError;
use service::StoreError;

/// JSON error body returned by every handler: `{"error", "message", "detail"}`.
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    pub status: StatusCode,
    /// short machine-readable kind
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self { status, error, message: message.into(), detail: None }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn not_found(what: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", format!("{what} not found"))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "forbidden", "admin access required")
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(&self)).into_response()
    }
}

impl From<StoreError> for JsonApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, "validation", msg),
            StoreError::Conflict(msg) => Self::new(StatusCode::CONFLICT, "conflict", msg),
            other => {
                error!(err = %other, "store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "storage", "storage failure").with_detail(other.to_string())
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let code = e.code().to_string();
        match e {
            AuthError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, "validation", msg).with_detail(code),
            AuthError::Conflict => Self::new(StatusCode::CONFLICT, "conflict", "user already exists").with_detail(code),
            AuthError::Unauthorized => Self::unauthorized("invalid credentials").with_detail(code),
            AuthError::TokenError(msg) => Self::unauthorized("invalid or expired token").with_detail(msg),
            AuthError::Store(inner) => inner.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_status() {
        assert_eq!(JsonApiError::from(StoreError::Validation("x".into())).status, StatusCode::BAD_REQUEST);
        assert_eq!(JsonApiError::from(StoreError::Conflict("x".into())).status, StatusCode::CONFLICT);
        let corrupt = StoreError::Corrupt { key: "blog_posts".into(), reason: "eof".into() };
        let mapped = JsonApiError::from(corrupt);
        assert_eq!(mapped.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(mapped.detail.is_some_and(|d| d.contains("blog_posts")));
    }

    #[test]
    fn auth_errors_map_to_status() {
        assert_eq!(JsonApiError::from(AuthError::Unauthorized).status, StatusCode::UNAUTHORIZED);
        assert_eq!(JsonApiError::from(AuthError::TokenError("bad".into())).status, StatusCode::UNAUTHORIZED);
        assert_eq!(JsonApiError::from(AuthError::Conflict).status, StatusCode::CONFLICT);
    }

    #[test]
    fn body_shape() {
        let body = serde_json::to_value(JsonApiError::not_found("post")).unwrap();
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "post not found");
        assert!(body.get("detail").is_none());
    }
}
