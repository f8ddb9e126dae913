use crate::core::config::AppConfig;
use crate::core::models::{JobInput, JobRequest};

/// Instruction placed ahead of every transcript.
pub const SUMMARY_INSTRUCTION: &str = "Please provide a comprehensive summary of the following transcription in approximately 4000 words. Focus on capturing the main points, key discussions, and important conclusions:";

#[must_use]
pub fn build_summary_prompt(transcript: &str) -> String {
    format!("{SUMMARY_INSTRUCTION}\n\n{transcript}")
}

/// Rough token estimation, ~4 characters per token.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// Wraps the prompt with the generation parameters from config.
#[must_use]
pub fn build_job_request(config: &AppConfig, transcript: &str) -> JobRequest {
    JobRequest {
        input: JobInput {
            prompt: build_summary_prompt(transcript),
            max_new_tokens: config.max_new_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        },
    }
}
