//! Builders for the structured result returned to the Lambda caller.

use serde_json::json;

use super::summarize::SummarizeOutcome;
use crate::core::models::HandlerResponse;

pub const SUCCESS_MESSAGE: &str = "Summarization completed successfully";
pub const SKIPPED_MESSAGE: &str = "Object is a generated summary; skipped";

/// 200 response describing where the summary went (or that it was skipped).
#[must_use]
pub fn success_response(outcome: &SummarizeOutcome) -> HandlerResponse {
    let body = match outcome {
        SummarizeOutcome::Stored(location) => json!({
            "message": SUCCESS_MESSAGE,
            "summary_location": location.to_string(),
        }),
        SummarizeOutcome::Skipped(location) => json!({
            "message": SKIPPED_MESSAGE,
            "object": location.to_string(),
        }),
    };
    HandlerResponse {
        status_code: 200,
        body: body.to_string(),
    }
}

/// 500 response carrying the error message.
///
/// # Examples
///
/// ```
/// use summarizer::worker::response::error_response;
///
/// let response = error_response("boom");
/// assert_eq!(response.status_code, 500);
/// assert_eq!(response.body, r#"{"error":"boom"}"#);
/// ```
#[must_use]
pub fn error_response(message: &str) -> HandlerResponse {
    HandlerResponse {
        status_code: 500,
        body: json!({ "error": message }).to_string(),
    }
}
