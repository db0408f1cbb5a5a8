use std::time::Duration;

use crate::contract::ValidationError;

pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1_000);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Linear backoff without jitter: attempt `n` that fails with a retryable
/// error waits `initial_delay * n` before attempt `n + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    initial_delay: Duration,
    max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(initial_delay: Duration, max_attempts: u32) -> Result<Self, ValidationError> {
        if max_attempts == 0 {
            return Err(ValidationError::new(
                "max_attempts must be a positive integer",
            ));
        }
        Ok(Self {
            initial_delay,
            max_attempts,
        })
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.initial_delay.saturating_mul(attempt)
    }

    pub fn allows_another_attempt(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: DEFAULT_INITIAL_DELAY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_grows_linearly() {
        let policy = RetryPolicy::new(Duration::from_millis(250), 4).expect("policy should build");
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(250));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(750));
    }

    #[test]
    fn stops_at_max_attempts() {
        let policy = RetryPolicy::new(Duration::ZERO, 3).expect("policy should build");
        assert!(policy.allows_another_attempt(2));
        assert!(!policy.allows_another_attempt(3));
    }

    #[test]
    fn rejects_zero_attempts() {
        let error = RetryPolicy::new(Duration::from_secs(1), 0).expect_err("zero should fail");
        assert_eq!(error.message(), "max_attempts must be a positive integer");
    }
}
