use crate::core::error::{PipelineError, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTP client shared by the providers, with an explicit request timeout.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent("econmind/1.0")
        .timeout(timeout)
        .build()
        .map_err(|e| PipelineError::network("http", format!("Failed to build HTTP client: {e}")))
}

/// Sends `request` and decodes the body as `T`.
///
/// Transport errors and non-success statuses map to `NetworkFailure`; a body
/// that does not decode into `T` maps to `SchemaMismatch`.
pub async fn fetch_json<T: DeserializeOwned>(provider: &str, request: RequestBuilder) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| PipelineError::network(provider, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PipelineError::network(
            provider,
            format!("HTTP status {status}"),
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| PipelineError::network(provider, format!("Failed to read body: {e}")))?;

    if body.trim().is_empty() {
        return Err(PipelineError::schema(provider, "empty response body"));
    }

    serde_json::from_str(&body).map_err(|e| {
        debug!(response = %body, "Failed to decode {} response", provider);
        PipelineError::schema(provider, e.to_string())
    })
}
