use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client};
use shared::protocol::ReasonResponse;
use url::Url;

use crate::error::ReasonFetchError;

pub const DEFAULT_REASON_ENDPOINT: &str = "https://naas.isalman.dev/no";

#[async_trait]
pub trait ReasonSource: Send + Sync {
    async fn fetch_reason(&self) -> Result<String, ReasonFetchError>;
}

/// Fetches one rejection reason per call from the remote service.
pub struct HttpReasonClient {
    http: Client,
    endpoint: Url,
}

impl HttpReasonClient {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, ReasonFetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ReasonFetchError::Transport)?;
        Ok(Self { http, endpoint })
    }
}

#[async_trait]
impl ReasonSource for HttpReasonClient {
    async fn fetch_reason(&self) -> Result<String, ReasonFetchError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(ReasonFetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReasonFetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(ReasonFetchError::Transport)?;
        let parsed: ReasonResponse = serde_json::from_slice(&body)
            .map_err(|err| ReasonFetchError::Malformed(err.to_string()))?;

        if parsed.reason.trim().is_empty() {
            return Err(ReasonFetchError::EmptyReason);
        }
        Ok(parsed.reason)
    }
}

#[cfg(test)]
#[path = "tests/reason_tests.rs"]
mod tests;
