//! Bounded status polling for submitted jobs.

use std::time::Duration;

use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{info, warn};

use crate::ai::{JobApi, normalize_output};
use crate::core::config::AppConfig;
use crate::core::models::JobStatus;
use crate::errors::SummarizerError;

#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            interval: config.poll_interval,
            max_attempts: config.max_poll_attempts,
        }
    }
}

/// Why a single status check did not produce a summary.
#[derive(Debug)]
enum AttemptError {
    Pending(String),
    Transient(SummarizerError),
    Fatal(SummarizerError),
}

impl AttemptError {
    fn should_retry(&self) -> bool {
        !matches!(self, AttemptError::Fatal(_))
    }
}

/// Polls `job_id` until it completes, fails, or the attempt budget runs out.
///
/// # Errors
///
/// - `JobFailed` when the job ends `FAILED` or `CANCELLED`
/// - `InvalidResponse` when a completed job carries no output
/// - `Timeout` when no terminal status is seen within `max_attempts` checks
pub async fn poll_job<A>(
    api: &A,
    job_id: &str,
    settings: PollSettings,
) -> Result<String, SummarizerError>
where
    A: JobApi + ?Sized,
{
    let max_attempts = settings.max_attempts;
    if max_attempts == 0 {
        return Err(SummarizerError::Timeout {
            job_id: job_id.to_string(),
            attempts: 0,
        });
    }

    info!(job_id, max_attempts, "Polling RunPod job status");

    // The first check runs immediately; each retry waits one interval.
    let strategy = FixedInterval::new(settings.interval).take((max_attempts - 1) as usize);
    let mut attempt = 0;
    let outcome = RetryIf::spawn(
        strategy,
        || {
            attempt += 1;
            check_once(api, job_id, attempt, max_attempts)
        },
        AttemptError::should_retry,
    )
    .await;

    match outcome {
        Ok(summary) => Ok(summary),
        Err(AttemptError::Fatal(e)) => Err(e),
        Err(AttemptError::Pending(_) | AttemptError::Transient(_)) => {
            Err(SummarizerError::Timeout {
                job_id: job_id.to_string(),
                attempts: max_attempts,
            })
        }
    }
}

async fn check_once<A>(
    api: &A,
    job_id: &str,
    attempt: u32,
    max_attempts: u32,
) -> Result<String, AttemptError>
where
    A: JobApi + ?Sized,
{
    let response = match api.status(job_id).await {
        Ok(response) => response,
        Err(e) if e.is_transient() => {
            warn!(
                "Error polling RunPod API (attempt {}/{}): {}",
                attempt, max_attempts, e
            );
            return Err(AttemptError::Transient(e));
        }
        Err(e) => return Err(AttemptError::Fatal(e)),
    };

    let status = response.job_status();
    info!(
        "Poll attempt {}/{}, status: {}",
        attempt,
        max_attempts,
        status.as_str()
    );

    match &status {
        JobStatus::Completed => response.output.as_ref().map(normalize_output).ok_or_else(|| {
            AttemptError::Fatal(SummarizerError::InvalidResponse(format!(
                "No output found in completed job {job_id}"
            )))
        }),
        JobStatus::Failed | JobStatus::Cancelled => {
            Err(AttemptError::Fatal(SummarizerError::JobFailed {
                status: status.as_str().to_string(),
                detail: response.error_detail(),
            }))
        }
        JobStatus::Pending(raw) => Err(AttemptError::Pending(raw.clone())),
    }
}
