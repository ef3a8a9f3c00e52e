use http::StatusCode;
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use shared::utils::{json_response, BodyFormat, ProxyResponse};

#[derive(Serialize)]
struct Greeting {
    message: &'static str,
}

pub(crate) async fn function_handler(event: LambdaEvent<Value>) -> Result<ProxyResponse, Error> {
    tracing::debug!("Received event: {:?}", event.payload);

    json_response(
        &StatusCode::OK,
        &Greeting {
            message: "Hello World!",
        },
        BodyFormat::Compact,
    )
}
