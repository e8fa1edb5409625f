//! Extraction failures and their HTTP mapping.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use thiserror::Error;

use crate::http::response::error_response;
use crate::observability::metrics;

/// Errors raised while turning a request into `(value, args)`.
///
/// Nothing here is recovered locally: a failed extraction rejects the whole
/// request and the error is rendered by [`IntoResponse`].
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The request body could not be read.
    #[error("Failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    /// The body is not valid JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// The body is valid JSON but not an object envelope.
    #[error("JSON body must be an object, got {0}")]
    BodyNotObject(&'static str),

    /// The value member does not match the handler's value type.
    #[error("Invalid value: {0}")]
    InvalidValue(#[source] serde_json::Error),

    /// The args field is not valid JSON.
    #[error("Invalid args: {0}")]
    InvalidArgs(#[source] serde_json::Error),

    /// The args field decoded to something other than a mapping.
    #[error("Args must be a JSON object, got {0}")]
    ArgsNotObject(&'static str),

    /// File mode was requested but no file part was sent.
    #[error("Missing file part `{0}`")]
    MissingFile(String),

    /// The request is not a multipart form.
    #[error("Invalid multipart request: {0}")]
    Multipart(#[from] MultipartRejection),

    /// The multipart stream broke off or a part could not be read.
    #[error("Failed to read multipart field: {0}")]
    MultipartField(#[from] MultipartError),
}

impl ExtractError {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::Body(_) => "body",
            ExtractError::InvalidBody(_) | ExtractError::BodyNotObject(_) => "invalid_body",
            ExtractError::InvalidValue(_) => "invalid_value",
            ExtractError::InvalidArgs(_) | ExtractError::ArgsNotObject(_) => "invalid_args",
            ExtractError::MissingFile(_) => "missing_file",
            ExtractError::Multipart(_) | ExtractError::MultipartField(_) => "multipart",
        }
    }

    /// HTTP status for this failure.
    ///
    /// Everything maps to 500 like any unhandled handler error, except an
    /// oversized body, which keeps the 413 the body limit reports.
    pub fn status(&self) -> StatusCode {
        let upstream = match self {
            ExtractError::Body(e) => e.status(),
            ExtractError::Multipart(e) => e.status(),
            ExtractError::MultipartField(e) => e.status(),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if upstream == StatusCode::PAYLOAD_TOO_LARGE {
            upstream
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ExtractError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(kind = self.kind(), status = %status, error = %self, "Request extraction failed");
        metrics::record_extract_failure(self.kind());
        error_response(status, &self)
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
