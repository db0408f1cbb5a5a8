use aws_config::BehaviorVersion;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use region_matrix_core::contract::AggregationResult;
use region_matrix_lambda::adapters::identity::StsIdentityProvider;
use region_matrix_lambda::adapters::object_store::S3ObjectStore;
use region_matrix_lambda::adapters::parameter_store::SsmParameterStore;
use region_matrix_lambda::config::AggregatorConfig;
use region_matrix_lambda::handlers::aggregate::{handle_aggregate_event, AggregateDependencies};
use region_matrix_lambda::telemetry;
use serde_json::Value;
use tracing::error;

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &AggregateDependencies<'_>,
) -> Result<AggregationResult, Error> {
    handle_aggregate_event(event.payload, deps)
        .await
        .map_err(|failure| {
            error!(error = %failure, "aggregation failed");
            Error::from(failure)
        })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();
    let config = AggregatorConfig::from_env()?;

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let identity = StsIdentityProvider::new(aws_sdk_sts::Client::new(&sdk_config));
    let parameters = SsmParameterStore::from_sdk_config(&sdk_config);
    let objects = S3ObjectStore::new(aws_sdk_s3::Client::new(&sdk_config));
    let deps = AggregateDependencies {
        identity: &identity,
        parameters: &parameters,
        objects: &objects,
        config: &config,
    };

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| handle_request(event, &deps))).await
}
