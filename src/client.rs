//! HTTP client for invoking component endpoints.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Errors returned by [`ComponentClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Client posting values and files to a component service.
pub struct ComponentClient {
    client: Client,
    base_url: String,
}

impl ComponentClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Post a JSON envelope `{"value": value, "args": args}`.
    pub async fn invoke(&self, path: &str, value: Value, args: Map<String, Value>) -> Result<Value, ClientError> {
        let resp = self
            .client
            .post(self.url(path))
            .json(&json!({ "value": value, "args": args }))
            .send()
            .await?;
        read_json(resp).await
    }

    /// Post a multipart form with a `file` part and a JSON-encoded `args` part.
    pub async fn upload(
        &self,
        path: &str,
        filename: &str,
        contents: Vec<u8>,
        args: Map<String, Value>,
    ) -> Result<Value, ClientError> {
        let form = Form::new()
            .part("file", Part::bytes(contents).file_name(filename.to_string()))
            .text("args", Value::Object(args).to_string());
        let resp = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await?;
        read_json(resp).await
    }

    /// Query the service health endpoint.
    pub async fn health(&self) -> Result<Value, ClientError> {
        let resp = self.client.get(self.url("/health")).send().await?;
        read_json(resp).await
    }
}

async fn read_json(resp: Response) -> Result<Value, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp.json().await?)
}
