//! Error responses.
//!
//! # Responsibilities
//! - Render failures as `{"error": "<message>"}` JSON bodies
//! - Map handler errors to 500, unknown routes to 404
//! - Turn handler panics into 500 responses instead of dropped connections

use std::any::Any;
use std::fmt::Display;

use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::extract::ExtractError;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Build a JSON error response.
pub fn error_response(status: StatusCode, message: impl Display) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Error type returned by component handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure raised by the business logic itself.
    #[error("{0}")]
    Handler(String),
}

impl ServiceError {
    pub fn handler(message: impl Into<String>) -> Self {
        ServiceError::Handler(message.into())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Extract(e) => e.into_response(),
            other => {
                tracing::error!(error = %other, "Component handler failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, other)
            }
        }
    }
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!(path = %uri.path(), "No route matched");
    error_response(StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
}

/// Response used by the panic-catching layer.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Handler panicked".to_string()
    };
    tracing::error!(panic = %message, "Component handler panicked");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}
