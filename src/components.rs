//! Reference components mounted by the service binary.
//!
//! `POST /echo` returns the extracted value and args; `POST /files`
//! describes the uploaded file. They double as smoke tests for a deployment.

use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;

use crate::extract::{Args, FileArgs, ValueArgs};

#[derive(Debug, Serialize)]
pub struct EchoResponse {
    pub value: Value,
    pub args: Args,
}

#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub filename: String,
    pub size: usize,
    pub content_type: Option<String>,
    pub args: Args,
}

/// Router with the reference components.
pub fn reference_components() -> Router {
    Router::new()
        .route("/echo", post(echo))
        .route("/files", post(describe_file))
}

async fn echo(ValueArgs(value, args): ValueArgs) -> Json<EchoResponse> {
    Json(EchoResponse { value, args })
}

async fn describe_file(FileArgs(file, args): FileArgs) -> Json<FileSummary> {
    Json(FileSummary {
        filename: file.name().to_string(),
        size: file.len(),
        content_type: file.content_type,
        args,
    })
}
