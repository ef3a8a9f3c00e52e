use crate::config::Config;
use event_handler::function_handler;
use lambda_runtime::{run, service_fn, tracing, Error};
use shared::configuration::LoggingConfig;
use shared::observability::init_subscriber;

mod config;
mod event_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let logging = LoggingConfig::load()
        .inspect_err(|e| eprintln!("Failed to load logging configuration: {}", e))?;
    init_subscriber(&logging)?;

    let config = Config::load()
        .inspect_err(|e| tracing::error!("Failed to load configuration: {}", e))?;

    run(service_fn(|event| function_handler(&config, event))).await
}
