//! Deployment submission over HTTP.
//!
//! One blocking POST per deploy. The payload goes out as JSON with the API
//! key repeated in the `X-API-KEY` header. Only `200 OK` is success; every
//! other status, 2xx included, is a rejection carrying the response body.
//! Nothing is retried.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::{debug, info, instrument};

use zrunner_core::{
    application::{SubmissionError, ports::DeploySubmitter},
    domain::DeploymentPayload,
    error::ZrunnerResult,
};

/// Header the deployment service reads the API key from.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// [`DeploySubmitter`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpDeploySubmitter {
    client: Client,
    timeout: Duration,
}

impl HttpDeploySubmitter {
    /// Build a submitter whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> ZrunnerResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("zrunner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SubmissionError::Transport {
                endpoint: String::new(),
                reason: format!("cannot build HTTP client: {e}"),
            })?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl DeploySubmitter for HttpDeploySubmitter {
    #[instrument(skip(self, payload, api_key), fields(project = %payload.project))]
    fn submit(
        &self,
        payload: &DeploymentPayload,
        api_key: &str,
        endpoint: &str,
    ) -> ZrunnerResult<()> {
        let body = serde_json::to_vec(payload).map_err(|e| SubmissionError::Encode {
            reason: e.to_string(),
        })?;
        debug!(bytes = body.len(), timeout = ?self.timeout, "Sending deployment request");

        let transport = |e: reqwest::Error| SubmissionError::Transport {
            endpoint: endpoint.to_string(),
            reason: error_chain(&e),
        };

        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, api_key)
            .body(body)
            .send()
            .map_err(transport)?;

        let status = response.status();
        debug!(status = status.as_u16(), "Deployment service responded");

        if status != StatusCode::OK {
            let body = response.text().map_err(transport)?;
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        info!("Deployment accepted");
        Ok(())
    }
}

/// `reqwest` errors wrap the interesting part (refused, timed out, DNS) in
/// their sources.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
