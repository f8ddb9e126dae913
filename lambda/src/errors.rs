use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to parse input: {0}")]
    ParseError(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Unexpected response from inference API: {0}")]
    InvalidResponse(String),

    #[error("{}", job_failed_message(.status, .detail))]
    JobFailed {
        status: String,
        detail: Option<String>,
    },

    #[error("Timed out waiting for job {job_id} after {attempts} polling attempts")]
    Timeout { job_id: String, attempts: u32 },
}

fn job_failed_message(status: &str, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("Job failed with status: {status}, error: {detail}"),
        None => format!("Job failed with status: {status}"),
    }
}

impl SummarizerError {
    /// Transport-level failures that are worth another status poll.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, SummarizerError::HttpError(_))
    }
}

impl From<reqwest::Error> for SummarizerError {
    fn from(error: reqwest::Error) -> Self {
        SummarizerError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for SummarizerError {
    fn from(error: serde_json::Error) -> Self {
        SummarizerError::ParseError(error.to_string())
    }
}
