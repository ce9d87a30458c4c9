//! Batch configuration: concurrency bound and retry parameters.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration for one batch run.
///
/// All fields have defaults; callers typically start from `BatchConfig::default()`
/// and override what they need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum number of requests concurrently in the transfer phase.
    pub concurrency: usize,
    /// Number of retries after the first attempt (total attempts = max_retries + 1).
    pub max_retries: u32,
    /// Base backoff unit; the wait before attempt k+1 is `retry_delay * 2^(k-1)`.
    pub retry_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: 3,
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// Structural configuration error. The only per-batch failure that is
/// surfaced to the caller; per-item download failures never are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
    #[error("retry delay must be greater than zero")]
    ZeroRetryDelay,
}

impl BatchConfig {
    /// Validates the configuration before any worker is started.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency < 1 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.retry_delay.is_zero() {
            return Err(ConfigError::ZeroRetryDelay);
        }
        Ok(())
    }
}
