use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An object in S3, addressed by bucket and decoded key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Body of `POST /run`.
#[derive(Debug, Clone, Serialize)]
pub struct JobRequest {
    pub input: JobInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobInput {
    pub prompt: String,
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSubmission {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Completed,
    Failed,
    Cancelled,
    /// Anything non-terminal, e.g. `IN_QUEUE` or `IN_PROGRESS`.
    Pending(String),
}

impl JobStatus {
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("COMPLETED") => JobStatus::Completed,
            Some("FAILED") => JobStatus::Failed,
            Some("CANCELLED") => JobStatus::Cancelled,
            Some(other) => JobStatus::Pending(other.to_string()),
            None => JobStatus::Pending("UNKNOWN".to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Completed => "COMPLETED",
            JobStatus::Failed => "FAILED",
            JobStatus::Cancelled => "CANCELLED",
            JobStatus::Pending(raw) => raw,
        }
    }
}

/// Body of `GET /status/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl StatusResponse {
    #[must_use]
    pub fn job_status(&self) -> JobStatus {
        JobStatus::parse(self.status.as_deref())
    }

    /// Error detail as plain text; JSON strings are unquoted.
    #[must_use]
    pub fn error_detail(&self) -> Option<String> {
        self.error.as_ref().map(|e| match e {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Result shape returned to the Lambda caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON document serialized to a string.
    pub body: String,
}
