// Lambda bootstrap entry point for the summarizer worker

use lambda_runtime::{Error, run, service_fn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    summarizer::setup_logging();

    run(service_fn(summarizer::worker::handler)).await
}
