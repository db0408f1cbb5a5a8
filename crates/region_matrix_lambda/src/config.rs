use std::time::Duration;

use region_matrix_core::retry::{RetryPolicy, DEFAULT_INITIAL_DELAY, DEFAULT_MAX_ATTEMPTS};

use crate::error::RegionMatrixError;

pub const BUCKET_NAME_VAR: &str = "BUCKET_NAME";
pub const RETRY_INITIAL_DELAY_MS_VAR: &str = "RETRY_INITIAL_DELAY_MS";
pub const RETRY_MAX_ATTEMPTS_VAR: &str = "RETRY_MAX_ATTEMPTS";
pub const SERVICE_DELAY_MS_VAR: &str = "SERVICE_DELAY_MS";
pub const REGION_FETCH_CONCURRENCY_VAR: &str = "REGION_FETCH_CONCURRENCY";

pub const DEFAULT_SERVICE_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_REGION_FETCH_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Destination bucket. Only required when results are uploaded.
    pub bucket: Option<String>,
    pub retry: RetryPolicy,
    /// Pause after every service to stay under the parameter store rate limit.
    pub service_delay: Duration,
    pub region_fetch_concurrency: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            bucket: None,
            retry: RetryPolicy::default(),
            service_delay: DEFAULT_SERVICE_DELAY,
            region_fetch_concurrency: DEFAULT_REGION_FETCH_CONCURRENCY,
        }
    }
}

impl AggregatorConfig {
    pub fn from_env() -> Result<Self, RegionMatrixError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RegionMatrixError> {
        let bucket = lookup(BUCKET_NAME_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let initial_delay = parse_u64(&lookup, RETRY_INITIAL_DELAY_MS_VAR)?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_INITIAL_DELAY);
        let max_attempts = match parse_u64(&lookup, RETRY_MAX_ATTEMPTS_VAR)? {
            Some(value) => u32::try_from(value).map_err(|_| {
                RegionMatrixError::Config(format!("{RETRY_MAX_ATTEMPTS_VAR} is out of range"))
            })?,
            None => DEFAULT_MAX_ATTEMPTS,
        };
        let retry = RetryPolicy::new(initial_delay, max_attempts).map_err(|error| {
            RegionMatrixError::Config(format!("{RETRY_MAX_ATTEMPTS_VAR}: {error}"))
        })?;

        let service_delay = parse_u64(&lookup, SERVICE_DELAY_MS_VAR)?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SERVICE_DELAY);

        let region_fetch_concurrency = match parse_u64(&lookup, REGION_FETCH_CONCURRENCY_VAR)? {
            Some(0) => {
                return Err(RegionMatrixError::Config(format!(
                    "{REGION_FETCH_CONCURRENCY_VAR} must be a positive integer"
                )));
            }
            Some(value) => usize::try_from(value).map_err(|_| {
                RegionMatrixError::Config(format!("{REGION_FETCH_CONCURRENCY_VAR} is out of range"))
            })?,
            None => DEFAULT_REGION_FETCH_CONCURRENCY,
        };

        Ok(Self {
            bucket,
            retry,
            service_delay,
            region_fetch_concurrency,
        })
    }
}

fn parse_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<u64>, RegionMatrixError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|error| RegionMatrixError::Config(format!("{key}={trimmed:?}: {error}")))
}
