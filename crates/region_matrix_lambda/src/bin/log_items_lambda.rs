use std::io::Stdout;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use region_matrix_lambda::handlers::log_items::{
    handle_log_event, ApiGatewayResponse, LineItemLogger,
};
use region_matrix_lambda::telemetry;
use serde_json::Value;

async fn handle_request(
    event: LambdaEvent<Value>,
    logger: &LineItemLogger<Stdout>,
) -> Result<ApiGatewayResponse, Error> {
    Ok(handle_log_event(&event.payload, logger))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();
    let logger = LineItemLogger::stdout();
    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        handle_request(event, &logger)
    }))
    .await
}
