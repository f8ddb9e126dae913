#![allow(clippy::missing_errors_doc)]
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::response::{error_response, success_response};
use super::summarize::{SummarizeOutcome, summarize_object};
use crate::ai::{JobApi, RunpodClient};
use crate::core::config::AppConfig;
use crate::core::models::HandlerResponse;
use crate::errors::SummarizerError;
use crate::s3_event::parse_object_location;
use crate::storage::{ObjectStore, S3Store};

/// Runs the pipeline for one notification and folds every failure into a
/// 500 response.
///
/// A config error is reported before the event is looked at; `connect`
/// only runs once the config is known to be valid.
pub async fn process_event<S, A, F>(
    payload: &Value,
    config: Result<AppConfig, SummarizerError>,
    store: &S,
    connect: F,
) -> HandlerResponse
where
    S: ObjectStore + ?Sized,
    A: JobApi,
    F: FnOnce(&AppConfig) -> A,
{
    match run_pipeline(payload, config, store, connect).await {
        Ok(outcome) => success_response(&outcome),
        Err(e) => {
            error!("Error in lambda handler: {}", e);
            error_response(&e.to_string())
        }
    }
}

async fn run_pipeline<S, A, F>(
    payload: &Value,
    config: Result<AppConfig, SummarizerError>,
    store: &S,
    connect: F,
) -> Result<SummarizeOutcome, SummarizerError>
where
    S: ObjectStore + ?Sized,
    A: JobApi,
    F: FnOnce(&AppConfig) -> A,
{
    let config = config?;
    let api = connect(&config);
    let location = parse_object_location(payload)?;
    summarize_object(store, &api, &config, &location).await
}

/// Lambda handler for S3 `ObjectCreated` notifications.
#[tracing::instrument(level = "info", skip(event), fields(request_id = %event.context.request_id))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<HandlerResponse, Error> {
    info!("Processing S3 event: {}", event.payload);

    let config = AppConfig::from_env();
    // Building the client issues no requests.
    let store = S3Store::from_env().await;

    Ok(process_event(&event.payload, config, &store, RunpodClient::from_config).await)
}

pub use self::function_handler as handler;
