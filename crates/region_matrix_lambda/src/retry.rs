use std::fmt::Display;
use std::future::Future;

use region_matrix_core::retry::RetryPolicy;
use tracing::warn;

use crate::error::Retryable;

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// uses up the attempts allowed by `policy`. Only rate-limited failures are
/// retried; the last failure is returned when attempts run out.
pub async fn with_backoff<T, E, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + Display,
{
    let mut attempt = 1u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_rate_limited() && policy.allows_another_attempt(attempt) => {
                let delay = policy.delay_for_attempt(attempt);
                warn!(
                    operation = label,
                    attempt,
                    max_attempts = policy.max_attempts(),
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "rate limited, backing off before retry"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
