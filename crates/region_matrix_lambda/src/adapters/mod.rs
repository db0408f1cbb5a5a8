//! Seams to the remote collaborators, each with an AWS SDK implementation.

pub mod identity;
pub mod object_store;
pub mod parameter_store;

use aws_sdk_ssm::config::http::HttpResponse;
use aws_sdk_ssm::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use crate::error::StoreError;

const THROTTLING_ERROR_CODES: [&str; 4] = [
    "ThrottlingException",
    "Throttling",
    "TooManyRequestsException",
    "RequestLimitExceeded",
];
const TOO_MANY_REQUESTS: u16 = 429;

/// Maps an SDK failure onto [`StoreError`], classifying throttling responses
/// as rate limited.
pub(crate) fn store_error_from_sdk<E>(
    operation: &'static str,
    error: SdkError<E, HttpResponse>,
) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let status = error.raw_response().map(|response| response.status().as_u16());
    let code = error.code().map(str::to_string);
    classify_failure(
        operation,
        code.as_deref(),
        status,
        DisplayErrorContext(&error).to_string(),
    )
}

pub(crate) fn classify_failure(
    operation: &'static str,
    code: Option<&str>,
    status: Option<u16>,
    message: String,
) -> StoreError {
    let throttled = code.is_some_and(|code| THROTTLING_ERROR_CODES.contains(&code))
        || status == Some(TOO_MANY_REQUESTS);

    if throttled {
        StoreError::RateLimited { operation, message }
    } else {
        StoreError::Request { operation, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Retryable;

    #[test]
    fn throttling_codes_are_rate_limited() {
        let error = classify_failure(
            "GetParametersByPath",
            Some("ThrottlingException"),
            Some(400),
            "Rate exceeded".to_string(),
        );
        assert!(error.is_rate_limited());
    }

    #[test]
    fn too_many_requests_status_is_rate_limited() {
        let error = classify_failure("PutObject", None, Some(429), "slow down".to_string());
        assert!(error.is_rate_limited());
    }

    #[test]
    fn other_failures_are_not_retryable() {
        let error = classify_failure(
            "GetParametersByPath",
            Some("AccessDeniedException"),
            Some(400),
            "denied".to_string(),
        );
        assert!(!error.is_rate_limited());
        assert_eq!(
            error.to_string(),
            "GetParametersByPath failed: denied".to_string()
        );
    }
}
