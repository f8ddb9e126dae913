//! RunPod serverless endpoint client
//!
//! Encapsulates the two calls the pipeline makes: starting a job and
//! checking its status.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::core::config::AppConfig;
use crate::core::models::{JobRequest, JobSubmission, StatusResponse};
use crate::errors::SummarizerError;

const SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);
const STATUS_TIMEOUT: Duration = Duration::from_secs(10);

/// Asynchronous inference job API.
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Starts a job and returns its identifier.
    async fn submit(&self, request: &JobRequest) -> Result<JobSubmission, SummarizerError>;

    /// Fetches the current status of a job.
    async fn status(&self, job_id: &str) -> Result<StatusResponse, SummarizerError>;
}

#[async_trait]
impl<T: JobApi + ?Sized> JobApi for &T {
    async fn submit(&self, request: &JobRequest) -> Result<JobSubmission, SummarizerError> {
        (**self).submit(request).await
    }

    async fn status(&self, job_id: &str) -> Result<StatusResponse, SummarizerError> {
        (**self).status(job_id).await
    }
}

pub struct RunpodClient {
    http: Client,
    api_key: String,
    endpoint_url: String,
}

impl RunpodClient {
    #[must_use]
    pub fn new(api_key: String, endpoint_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            endpoint_url: endpoint_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.runpod_api_key.clone(),
            config.runpod_endpoint_url.clone(),
        )
    }

    #[must_use]
    pub fn run_url(&self) -> String {
        format!("{}/run", self.endpoint_url)
    }

    #[must_use]
    pub fn status_url(&self, job_id: &str) -> String {
        format!("{}/status/{}", self.endpoint_url, job_id)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.api_key)
    }
}

/// Turns a non-2xx response into an `HttpError` carrying the body text.
async fn ensure_success(response: Response, what: &str) -> Result<Response, SummarizerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_else(|e| {
        format!("Failed to read error response body (status {status}): {e}")
    });
    error!("{} returned status {}: {}", what, status, body);
    Err(SummarizerError::HttpError(format!(
        "{what} failed (status {status}): {body}"
    )))
}

#[async_trait]
impl JobApi for RunpodClient {
    async fn submit(&self, request: &JobRequest) -> Result<JobSubmission, SummarizerError> {
        info!("Sending request to RunPod API");

        let response = self
            .authorized(self.http.post(self.run_url()))
            .timeout(SUBMIT_TIMEOUT)
            .json(request)
            .send()
            .await
            .map_err(|e| SummarizerError::HttpError(format!("RunPod run request failed: {e}")))?;

        let response = ensure_success(response, "RunPod run request").await?;
        let body: serde_json::Value = response.json().await.map_err(|e| {
            SummarizerError::InvalidResponse(format!("Failed to parse RunPod run response: {e}"))
        })?;

        let id = body
            .get("id")
            .and_then(|v| v.as_str())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                SummarizerError::InvalidResponse(format!(
                    "RunPod API did not return a job ID: {body}"
                ))
            })?;

        info!(job_id = %id, "RunPod job initiated");
        Ok(JobSubmission { id: id.to_string() })
    }

    async fn status(&self, job_id: &str) -> Result<StatusResponse, SummarizerError> {
        let url = self.status_url(job_id);
        debug!(%url, "Checking RunPod job status");

        let response = self
            .authorized(self.http.get(&url))
            .timeout(STATUS_TIMEOUT)
            .send()
            .await?;

        let response = ensure_success(response, "RunPod status request").await?;
        // Undecodable bodies are treated like any other transport hiccup.
        Ok(response.json::<StatusResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_trimmed_endpoint() {
        let client = RunpodClient::new(
            "key".to_string(),
            "https://api.runpod.ai/v2/endpoint/".to_string(),
        );
        assert_eq!(client.run_url(), "https://api.runpod.ai/v2/endpoint/run");
        assert_eq!(
            client.status_url("job-1"),
            "https://api.runpod.ai/v2/endpoint/status/job-1"
        );
    }
}
