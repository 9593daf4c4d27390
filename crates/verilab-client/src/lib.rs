//! # Verilab Client
//!
//! HTTP client for the remote compile/simulate backend.
//!
//! ## Protocol
//!
//! ```json
//! // POST /run
//! {"code": "module hello; ... endmodule"}
//!
//! // 2xx response
//! {"output": "Hello, VLSI World!\n"}
//! ```
//!
//! `GET /` is a liveness probe; only its status matters.
//!
//! Any transport error, non-success status or unparseable body is an error.
//! Callers fold all of them into a single
//! [`SubmissionFailure`](verilab_core::SubmissionFailure).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use verilab_core::config::BackendConfig;
use verilab_core::{SubmissionFailure, SubmissionResult, SubmissionTicket};

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Backend client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ClientError> for SubmissionFailure {
    fn from(err: ClientError) -> Self {
        SubmissionFailure::new(err.to_string())
    }
}

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    code: &'a str,
}

#[derive(Debug, Deserialize)]
struct RunResponse {
    output: String,
}

/// Client for one backend.
#[derive(Debug, Clone)]
pub struct CompilerClient {
    http: Client,
    base_url: String,
    request_timeout: Duration,
    probe_timeout: Duration,
}

impl CompilerClient {
    /// Creates a client with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        let defaults = BackendConfig::default();
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(defaults.request_timeout_secs),
            probe_timeout: Duration::from_secs(defaults.probe_timeout_secs),
        }
    }

    /// Creates a client from the backend section of the config.
    pub fn from_config(config: &BackendConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.url.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Sends code to `/run` and returns the backend's output text.
    pub async fn run(&self, code: &str) -> ClientResult<String> {
        let url = self.endpoint("run");
        tracing::debug!("POST {} ({} bytes)", url, code.len());

        let response = self
            .http
            .post(&url)
            .json(&RunRequest { code })
            .timeout(self.request_timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: RunResponse = serde_json::from_str(&body)?;
        Ok(parsed.output)
    }

    /// Checks that the backend answers `GET /` with a success status.
    pub async fn probe(&self) -> ClientResult<()> {
        let url = self.endpoint("");
        let response = self
            .http
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        tracing::info!("Backend reachable at {}", self.base_url);
        Ok(())
    }

    /// Runs a ticketed submission and hands the ticket back with its result.
    pub async fn submit(
        &self,
        ticket: SubmissionTicket,
        code: String,
    ) -> (SubmissionTicket, SubmissionResult) {
        let result = self.run(&code).await.map_err(SubmissionFailure::from);
        (ticket, result)
    }
}
