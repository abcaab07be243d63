//! Application error types.
//!
//! Every error renders as `{"detail": ...}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use payman_core::PaymanError;
use serde::Serialize;
use thiserror::Error;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: serde_json::Value,
}

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request body could not be extracted.
    #[error("Rejected request: {message}")]
    Rejected { status: StatusCode, message: String },

    /// Payman answered with an error status; mirrored to the caller.
    #[error("Upstream error: HTTP {status}")]
    Upstream {
        status: StatusCode,
        body: serde_json::Value,
    },

    /// Payman could not be reached or sent an unreadable response.
    #[error("Upstream transport error: {0}")]
    Transport(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail): (StatusCode, serde_json::Value) = match self {
            AppError::Validation(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.into()),
            AppError::Rejected { status, message } => (status, message.into()),
            AppError::Upstream { status, body } => (status, body),
            AppError::Transport(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.into()),
            AppError::Config(_) | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".into(),
            ),
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Rejected {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

impl From<PaymanError> for AppError {
    fn from(e: PaymanError) -> Self {
        match e {
            PaymanError::Upstream { status, body } => match StatusCode::from_u16(status) {
                Ok(status) => AppError::Upstream { status, body },
                Err(_) => AppError::Internal(format!("invalid upstream status {status}")),
            },
            PaymanError::Transport(msg) => AppError::Transport(msg),
            PaymanError::Rpc { .. } | PaymanError::Config(_) => AppError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&body).expect("parse JSON"))
    }

    #[tokio::test]
    async fn upstream_status_and_body_are_mirrored() {
        let err = AppError::from(PaymanError::Upstream {
            status: 429,
            body: json!({ "error": "rate limited" }),
        });
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, json!({ "detail": { "error": "rate limited" } }));
    }

    #[tokio::test]
    async fn transport_error_is_500_with_text() {
        let err = AppError::from(PaymanError::Transport("connection refused".into()));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "connection refused" }));
    }

    #[tokio::test]
    async fn unclassified_errors_hide_detail() {
        for err in [
            PaymanError::Rpc {
                code: -32000,
                message: "boom".into(),
            },
            PaymanError::Config("bad url".into()),
        ] {
            let (status, body) = render(AppError::from(err)).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, json!({ "detail": "Internal Server Error" }));
        }
    }

    #[tokio::test]
    async fn validation_is_422() {
        let (status, body) = render(AppError::Validation("query must not be empty".into())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"], "query must not be empty");
    }

    #[test]
    fn out_of_range_upstream_status_is_internal() {
        let err = AppError::from(PaymanError::Upstream {
            status: 42,
            body: json!(null),
        });
        assert!(matches!(err, AppError::Internal(_)));
    }
}
