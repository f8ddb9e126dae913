use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::SummarizerError;

pub const DEFAULT_OUTPUT_PREFIX: &str = "summaries/";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 60;
/// Roughly 4000 words at four tokens per word.
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 16_000;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_P: f32 = 0.9;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub runpod_api_key: String,
    pub runpod_endpoint_url: String,
    /// `None` writes the summary back into the bucket the transcript came from.
    pub output_bucket: Option<String>,
    pub output_prefix: String,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if the RunPod credentials are missing or a numeric
    /// setting cannot be parsed.
    pub fn from_env() -> Result<Self, SummarizerError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SummarizerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let runpod_api_key = non_empty("RUNPOD_API_KEY");
        let runpod_endpoint_url = non_empty("RUNPOD_ENDPOINT_URL");
        let (Some(runpod_api_key), Some(runpod_endpoint_url)) =
            (runpod_api_key, runpod_endpoint_url)
        else {
            return Err(SummarizerError::ConfigError(
                "RunPod API key or endpoint URL not configured".to_string(),
            ));
        };

        Ok(Self {
            runpod_api_key,
            runpod_endpoint_url: runpod_endpoint_url.trim_end_matches('/').to_string(),
            output_bucket: non_empty("OUTPUT_BUCKET"),
            output_prefix: lookup("OUTPUT_PREFIX")
                .unwrap_or_else(|| DEFAULT_OUTPUT_PREFIX.to_string()),
            poll_interval: Duration::from_secs(parse_or(
                &lookup,
                "POLL_INTERVAL_SECS",
                DEFAULT_POLL_INTERVAL_SECS,
            )?),
            max_poll_attempts: parse_or(&lookup, "MAX_POLL_ATTEMPTS", DEFAULT_MAX_POLL_ATTEMPTS)?,
            max_new_tokens: parse_or(&lookup, "MAX_NEW_TOKENS", DEFAULT_MAX_NEW_TOKENS)?,
            temperature: parse_or(&lookup, "TEMPERATURE", DEFAULT_TEMPERATURE)?,
            top_p: parse_or(&lookup, "TOP_P", DEFAULT_TOP_P)?,
        })
    }

    /// Bucket the summary is written to for a transcript stored in `input_bucket`.
    #[must_use]
    pub fn output_bucket_for<'a>(&'a self, input_bucket: &'a str) -> &'a str {
        self.output_bucket.as_deref().unwrap_or(input_bucket)
    }
}

fn parse_or<T, F>(lookup: &F, name: &str, default: T) -> Result<T, SummarizerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| SummarizerError::ConfigError(format!("{name}: {e}"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_credentials_are_set() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("RUNPOD_API_KEY", "key"),
            ("RUNPOD_ENDPOINT_URL", "https://api.runpod.ai/v2/abc/"),
        ]))
        .unwrap();

        assert_eq!(config.runpod_endpoint_url, "https://api.runpod.ai/v2/abc");
        assert_eq!(config.output_bucket, None);
        assert_eq!(config.output_prefix, "summaries/");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.max_poll_attempts, 60);
        assert_eq!(config.max_new_tokens, 16_000);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert!((config.top_p - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_credentials_fail_fast() {
        let err = AppConfig::from_lookup(lookup_from(&[("RUNPOD_API_KEY", "key")])).unwrap_err();
        assert!(matches!(err, SummarizerError::ConfigError(_)));

        let err = AppConfig::from_lookup(lookup_from(&[
            ("RUNPOD_API_KEY", ""),
            ("RUNPOD_ENDPOINT_URL", "https://example.com"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }

    #[test]
    fn malformed_numbers_are_config_errors() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("RUNPOD_API_KEY", "key"),
            ("RUNPOD_ENDPOINT_URL", "https://example.com"),
            ("MAX_POLL_ATTEMPTS", "lots"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("MAX_POLL_ATTEMPTS"));
    }

    #[test]
    fn empty_output_bucket_means_input_bucket() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("RUNPOD_API_KEY", "key"),
            ("RUNPOD_ENDPOINT_URL", "https://example.com"),
            ("OUTPUT_BUCKET", ""),
            ("OUTPUT_PREFIX", ""),
        ]))
        .unwrap();
        assert_eq!(config.output_bucket_for("transcripts"), "transcripts");
        assert_eq!(config.output_prefix, "");
    }
}
