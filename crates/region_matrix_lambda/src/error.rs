use region_matrix_core::contract::ValidationError;
use thiserror::Error;

/// Failure of a single call to a remote collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{operation} was rate limited: {message}")]
    RateLimited {
        operation: &'static str,
        message: String,
    },
    #[error("{operation} failed: {message}")]
    Request {
        operation: &'static str,
        message: String,
    },
    #[error("{operation} response is missing `{field}`")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },
}

/// Classifies failures the backoff retrier is allowed to retry.
pub trait Retryable {
    fn is_rate_limited(&self) -> bool;
}

impl Retryable for StoreError {
    fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

#[derive(Debug, Error)]
pub enum RegionMatrixError {
    #[error("caller identity check failed: {0}")]
    Identity(#[source] StoreError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("BUCKET_NAME must be configured to upload results")]
    MissingBucket,
    #[error("failed to upload {key}: {source}")]
    Upload {
        key: String,
        #[source]
        source: StoreError,
    },
    #[error("failed to serialize {document}: {source}")]
    Serialization {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),
}
