use event_handler::function_handler;
use lambda_runtime::{run, service_fn, Error};
use shared::configuration::LoggingConfig;
use shared::observability::init_subscriber;

mod event_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let logging = LoggingConfig::load()
        .inspect_err(|e| eprintln!("Failed to load logging configuration: {}", e))?;
    init_subscriber(&logging)?;

    run(service_fn(function_handler)).await
}
