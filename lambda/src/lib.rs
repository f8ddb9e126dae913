//! Summarizer - an S3-triggered Lambda that summarizes transcripts with a
//! RunPod serverless LLM endpoint.
//!
//! For every `ObjectCreated` notification the worker:
//! 1. fetches the transcript from S3
//! 2. starts a summarization job on the RunPod endpoint
//! 3. polls the job until it completes, fails, or the poll budget runs out
//! 4. writes the summary back to S3 under a derived key
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution
//! - aws-sdk-s3 for object storage
//! - reqwest for the RunPod job API
//! - tokio-retry for the status poll loop
//! - Tokio for async runtime
//!
//! Storage and the job API sit behind the [`storage::ObjectStore`] and
//! [`ai::JobApi`] traits so the pipeline can run against in-memory fakes.
//!
//! # Example
//!
//! ```no_run
//! use summarizer::ai::RunpodClient;
//! use summarizer::core::config::AppConfig;
//! use summarizer::core::models::ObjectLocation;
//! use summarizer::storage::S3Store;
//! use summarizer::worker::summarize::{SummarizeOutcome, summarize_object};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     summarizer::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let store = S3Store::from_env().await;
//!     let api = RunpodClient::from_config(&config);
//!
//!     let input = ObjectLocation::new("transcripts", "calls/standup.txt");
//!     match summarize_object(&store, &api, &config, &input).await? {
//!         SummarizeOutcome::Stored(location) => println!("Summary at {location}"),
//!         SummarizeOutcome::Skipped(location) => println!("Skipped {location}"),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod core;
pub mod errors;
pub mod prompt;
pub mod s3_event;
pub mod storage;
pub mod worker;

pub use errors::SummarizerError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration, filtered by `RUST_LOG` (default `info`).
/// Calling it again after a subscriber is installed is a no-op.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// summarizer::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
