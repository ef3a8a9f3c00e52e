use crate::authorizer::function_handler;
use crate::config::Config;
use lambda_runtime::{run, service_fn, tracing, Error};
use shared::configuration::LoggingConfig;
use shared::observability::init_subscriber;

mod authorizer;
mod config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let logging = LoggingConfig::load()
        .inspect_err(|e| eprintln!("Failed to load logging configuration: {}", e))?;
    init_subscriber(&logging)?;

    let config = Config::load()
        .inspect_err(|e| tracing::error!("Failed to load configuration: {}", e))?;
    tracing::info!(
        "Allowing {} source ranges as {}",
        config.allowed_source_ips.len(),
        config.principal_id
    );

    run(service_fn(|event| function_handler(&config, event))).await
}
