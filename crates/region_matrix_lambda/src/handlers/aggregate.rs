use region_matrix_core::contract::{AggregateRequest, AggregationResult};
use serde_json::Value;
use tracing::info;

use crate::adapters::identity::IdentityProvider;
use crate::adapters::object_store::ObjectStore;
use crate::adapters::parameter_store::ParameterStore;
use crate::aggregator::RegionServiceAggregator;
use crate::config::AggregatorConfig;
use crate::error::RegionMatrixError;
use crate::uploader::upload_result;

/// Collaborators for one aggregation invocation, built once per cold start.
pub struct AggregateDependencies<'a> {
    pub identity: &'a dyn IdentityProvider,
    pub parameters: &'a dyn ParameterStore,
    pub objects: &'a dyn ObjectStore,
    pub config: &'a AggregatorConfig,
}

pub async fn handle_aggregate_event(
    payload: Value,
    deps: &AggregateDependencies<'_>,
) -> Result<AggregationResult, RegionMatrixError> {
    let request = AggregateRequest::from_payload(payload)?;
    handle_aggregate_request(request, deps).await
}

pub async fn handle_aggregate_request(
    request: AggregateRequest,
    deps: &AggregateDependencies<'_>,
) -> Result<AggregationResult, RegionMatrixError> {
    let identity = deps
        .identity
        .caller_identity()
        .await
        .map_err(RegionMatrixError::Identity)?;
    info!(
        account = identity.account.as_deref().unwrap_or("unknown"),
        arn = identity.arn.as_deref().unwrap_or("unknown"),
        "verified caller identity"
    );

    let result = RegionServiceAggregator::new(deps.parameters, deps.config)
        .aggregate(request.services.as_deref())
        .await?;

    if request.skip_s3_upload {
        info!("skipping upload as requested");
    } else {
        upload_result(deps.objects, deps.config.bucket.as_deref(), &result).await?;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use region_matrix_core::contract::CallerIdentity;
    use region_matrix_core::parameter_paths::service_attributes_path;
    use serde_json::json;

    use super::*;
    use crate::aggregator::tests::{sample_store, test_config};
    use crate::error::StoreError;
    use crate::pagination::tests::PagedStore;
    use crate::uploader::tests::RecordingStore;

    struct StaticIdentity {
        fail: bool,
        calls: AtomicUsize,
    }

    impl StaticIdentity {
        fn ok() -> Self {
            Self {
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for StaticIdentity {
        async fn caller_identity(&self) -> Result<CallerIdentity, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StoreError::Request {
                    operation: "GetCallerIdentity",
                    message: "ExpiredToken".to_string(),
                });
            }
            Ok(CallerIdentity {
                account: Some("123456789012".to_string()),
                arn: None,
                user_id: None,
            })
        }
    }

    fn deps<'a>(
        identity: &'a StaticIdentity,
        parameters: &'a PagedStore,
        objects: &'a RecordingStore,
        config: &'a AggregatorConfig,
    ) -> AggregateDependencies<'a> {
        AggregateDependencies {
            identity,
            parameters,
            objects,
            config,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn aggregates_and_uploads_by_default() {
        let (identity, parameters, objects, config) =
            (StaticIdentity::ok(), sample_store(), RecordingStore::default(), test_config());

        let dependencies = deps(&identity, &parameters, &objects, &config);

        let result = handle_aggregate_event(Value::Null, &dependencies)
            .await
            .expect("aggregation should succeed");

        assert_eq!(result.services.len(), 3);
        assert_eq!(identity.calls.load(Ordering::SeqCst), 1);
        let keys: Vec<String> = objects.objects().into_iter().map(|o| o.key).collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"data/regions.json".to_string()));
        assert!(keys.contains(&"data/services.json".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn skip_upload_still_returns_result() {
        let (identity, parameters, objects, config) =
            (StaticIdentity::ok(), sample_store(), RecordingStore::default(), test_config());

        let result = handle_aggregate_event(
            json!({"skipS3Upload": true}),
            &deps(&identity, &parameters, &objects, &config),
        )
        .await
        .expect("aggregation should succeed");

        assert_eq!(result.regions.len(), 3);
        assert_eq!(result.services.len(), 3);
        assert!(objects.objects().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_service_is_absent_but_others_remain() {
        let identity = StaticIdentity::ok();
        let parameters = sample_store().failing_first(
            &service_attributes_path("lambda"),
            vec![StoreError::Request {
                operation: "GetParametersByPath",
                message: "InternalServerError".to_string(),
            }],
        );
        let objects = RecordingStore::default();
        let config = test_config();

        let result = handle_aggregate_event(
            json!({"services": ["sqs", "lambda", "braket"], "skipS3Upload": true}),
            &deps(&identity, &parameters, &objects, &config),
        )
        .await
        .expect("aggregation should succeed");

        let names: Vec<&str> = result.services.iter().map(|s| s.service.as_str()).collect();
        assert_eq!(names, vec!["braket", "sqs"]);
    }

    #[tokio::test]
    async fn identity_failure_aborts_before_any_fetch() {
        let (identity, parameters, objects, config) = (
            StaticIdentity::failing(),
            sample_store(),
            RecordingStore::default(),
            test_config(),
        );

        let dependencies = deps(&identity, &parameters, &objects, &config);

        let error = handle_aggregate_event(Value::Null, &dependencies)
            .await
            .expect_err("identity failure should abort");

        assert!(matches!(error, RegionMatrixError::Identity(_)));
        assert!(parameters.requests().is_empty());
        assert!(objects.objects().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn missing_bucket_fails_when_uploading() {
        let (identity, parameters, objects) =
            (StaticIdentity::ok(), sample_store(), RecordingStore::default());
        let config = AggregatorConfig {
            bucket: None,
            ..test_config()
        };

        let error = handle_aggregate_event(
            json!({"services": ["sqs"]}),
            &deps(&identity, &parameters, &objects, &config),
        )
        .await
        .expect_err("upload without bucket should fail");

        assert!(matches!(error, RegionMatrixError::MissingBucket));
    }

    #[tokio::test]
    async fn malformed_request_is_rejected() {
        let (identity, parameters, objects, config) =
            (StaticIdentity::ok(), sample_store(), RecordingStore::default(), test_config());

        let error = handle_aggregate_event(
            json!({"skipS3Upload": "yes"}),
            &deps(&identity, &parameters, &objects, &config),
        )
        .await
        .expect_err("malformed request should fail");

        assert!(matches!(error, RegionMatrixError::InvalidRequest(_)));
        assert_eq!(identity.calls.load(Ordering::SeqCst), 0);
    }
}
