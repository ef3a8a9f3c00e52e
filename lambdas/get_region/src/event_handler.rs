use crate::config::Config;
use http::StatusCode;
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use shared::utils::{json_response, BodyFormat, ProxyResponse};

#[derive(Serialize)]
struct RegionBody<'a> {
    // The trailing space is part of the published contract.
    #[serde(rename = "Region ")]
    region: &'a str,
}

pub(crate) async fn function_handler(
    config: &Config,
    event: LambdaEvent<Value>,
) -> Result<ProxyResponse, Error> {
    tracing::debug!("Received event: {:?}", event.payload);
    tracing::debug!("Received context: {:?}", event.context);

    let body = RegionBody {
        region: &config.aws_region,
    };
    json_response(&StatusCode::OK, &body, BodyFormat::Spaced)
}
