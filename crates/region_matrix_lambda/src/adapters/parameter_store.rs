use async_trait::async_trait;
use aws_sdk_ssm::config::retry::RetryConfig;
use region_matrix_core::contract::{ParameterEntry, ParameterPage};

use crate::adapters::store_error_from_sdk;
use crate::error::StoreError;

const OPERATION: &str = "GetParametersByPath";

/// Hierarchical key-value store listed one page at a time.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    async fn list_by_path(
        &self,
        path: &str,
        next_token: Option<&str>,
    ) -> Result<ParameterPage, StoreError>;
}

#[derive(Debug, Clone)]
pub struct SsmParameterStore {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }

    /// Builds a client with the SDK retry layer disabled; throttling is
    /// handled by the backoff retrier instead.
    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        let ssm_config = aws_sdk_ssm::config::Builder::from(config)
            .retry_config(RetryConfig::disabled())
            .build();
        Self::new(aws_sdk_ssm::Client::from_conf(ssm_config))
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn list_by_path(
        &self,
        path: &str,
        next_token: Option<&str>,
    ) -> Result<ParameterPage, StoreError> {
        let output = self
            .client
            .get_parameters_by_path()
            .path(path)
            .recursive(false)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|error| store_error_from_sdk(OPERATION, error))?;

        let entries = output
            .parameters()
            .iter()
            .map(|parameter| {
                let name = parameter.name().ok_or(StoreError::MissingField {
                    operation: OPERATION,
                    field: "Name",
                })?;
                let value = parameter.value().ok_or(StoreError::MissingField {
                    operation: OPERATION,
                    field: "Value",
                })?;
                Ok(ParameterEntry::new(name, value))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok(ParameterPage {
            entries,
            next_token: output
                .next_token()
                .filter(|token| !token.is_empty())
                .map(str::to_string),
        })
    }
}
