use tracing::info;

use super::poll::{PollSettings, poll_job};
use crate::ai::JobApi;
use crate::core::config::AppConfig;
use crate::core::models::ObjectLocation;
use crate::errors::SummarizerError;
use crate::prompt::{build_job_request, estimate_tokens};
use crate::storage::ObjectStore;

pub const SUMMARY_CONTENT_TYPE: &str = "text/plain";
pub const SUMMARY_SUFFIX: &str = "_summary.txt";

/// What happened to the object named in the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizeOutcome {
    Stored(ObjectLocation),
    /// The object is itself a summary written by this function.
    Skipped(ObjectLocation),
}

/// `prefix` + the key's basename with `.txt` renamed to `_summary.txt`.
#[must_use]
pub fn derive_output_key(prefix: &str, input_key: &str) -> String {
    format!("{prefix}{}", basename(input_key).replace(".txt", SUMMARY_SUFFIX))
}

fn basename(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// True when writing the summary would land on, or re-trigger from, the input.
///
/// Only applies when summaries go back into the input bucket. With a prefix,
/// anything under it is a summary; without one, summaries are recognised by
/// their `_summary.txt` suffix.
#[must_use]
pub fn is_self_triggered(config: &AppConfig, input: &ObjectLocation, output_key: &str) -> bool {
    if config.output_bucket_for(&input.bucket) != input.bucket {
        return false;
    }
    if output_key == input.key {
        return true;
    }
    if config.output_prefix.is_empty() {
        basename(&input.key).ends_with(SUMMARY_SUFFIX)
    } else {
        input.key.starts_with(&config.output_prefix)
    }
}

/// Fetch, submit, poll, store.
///
/// # Errors
///
/// Storage errors propagate immediately. Job submission errors, terminal job
/// failures and poll timeouts propagate from the inference client.
pub async fn summarize_object<S, A>(
    store: &S,
    api: &A,
    config: &AppConfig,
    input: &ObjectLocation,
) -> Result<SummarizeOutcome, SummarizerError>
where
    S: ObjectStore + ?Sized,
    A: JobApi + ?Sized,
{
    let output = ObjectLocation::new(
        config.output_bucket_for(&input.bucket),
        derive_output_key(&config.output_prefix, &input.key),
    );

    if is_self_triggered(config, input, &output.key) {
        info!(input = %input, "Object is a generated summary, skipping");
        return Ok(SummarizeOutcome::Skipped(input.clone()));
    }

    info!("Processing file {}", input);

    let bytes = store.get(&input.bucket, &input.key).await?;
    let transcript = String::from_utf8(bytes).map_err(|e| {
        SummarizerError::ParseError(format!("{input} is not valid UTF-8 text: {e}"))
    })?;
    info!(
        "Successfully retrieved file, size: {} characters",
        transcript.chars().count()
    );

    let request = build_job_request(config, &transcript);
    #[cfg(feature = "debug-logs")]
    tracing::debug!("Using summarization prompt:\n{}", request.input.prompt);

    info!(
        estimated_input_tokens = estimate_tokens(&request.input.prompt),
        max_new_tokens = request.input.max_new_tokens,
        "Submitting summarization job"
    );
    let submission = api.submit(&request).await?;

    let summary = poll_job(api, &submission.id, PollSettings::from_config(config)).await?;

    store
        .put(
            &output.bucket,
            &output.key,
            summary.into_bytes(),
            SUMMARY_CONTENT_TYPE,
        )
        .await?;

    info!("Summary successfully stored at {}", output);
    Ok(SummarizeOutcome::Stored(output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_key_uses_basename_and_prefix() {
        assert_eq!(
            derive_output_key("summaries/", "uploads/2024/meeting.txt"),
            "summaries/meeting_summary.txt"
        );
        assert_eq!(derive_output_key("", "notes.txt"), "notes_summary.txt");
    }

    #[test]
    fn output_key_without_txt_keeps_name() {
        assert_eq!(derive_output_key("out/", "raw/notes.md"), "out/notes.md");
    }
}
