use async_trait::async_trait;
use region_matrix_core::contract::CallerIdentity;

use crate::adapters::store_error_from_sdk;
use crate::error::StoreError;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn caller_identity(&self) -> Result<CallerIdentity, StoreError>;
}

#[derive(Debug, Clone)]
pub struct StsIdentityProvider {
    client: aws_sdk_sts::Client,
}

impl StsIdentityProvider {
    pub fn new(client: aws_sdk_sts::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityProvider for StsIdentityProvider {
    async fn caller_identity(&self) -> Result<CallerIdentity, StoreError> {
        let output = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(|error| store_error_from_sdk("GetCallerIdentity", error))?;

        Ok(CallerIdentity {
            account: output.account().map(str::to_string),
            arn: output.arn().map(str::to_string),
            user_id: output.user_id().map(str::to_string),
        })
    }
}
