use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

use crate::dto::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("malformed request body: {0}")]
    BadBody(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(e) => match e {
                ServiceError::EmptyName | ServiceError::InvalidValue => StatusCode::BAD_REQUEST,
                ServiceError::NotFound => StatusCode::NOT_FOUND,
                ServiceError::Internal | ServiceError::Canceled | ServiceError::DeadlineExceeded => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Message sent to clients. Never carries internal detail.
    pub fn public_message(&self) -> &'static str {
        let status = self.status();
        if status == StatusCode::BAD_REQUEST {
            "bad request"
        } else if status == StatusCode::NOT_FOUND {
            "not found"
        } else {
            "internal server error"
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse { error: self.public_message().to_string() };
        (self.status(), Json(body)).into_response()
    }
}

/// Response for a handler that panicked, used by `CatchPanicLayer`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!(event = "panic_recovered", panic = %detail, "handler panicked");
    let body = ErrorResponse { error: "internal server error".into() };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
