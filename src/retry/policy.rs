use std::time::Duration;

use crate::config::BatchConfig;

/// Pure exponential backoff: `base_delay * 2^(attempt-1)`, no jitter, no cap.
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Base backoff unit.
    pub base_delay: Duration,
}

impl BackoffPolicy {
    pub fn from_config(cfg: &BatchConfig) -> Self {
        Self {
            max_retries: cfg.max_retries,
            base_delay: cfg.retry_delay,
        }
    }

    /// Total attempts allowed, including the first.
    pub fn total_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Delay before the attempt following `attempt` (1-based attempt that
    /// just failed). Saturates instead of overflowing on absurd inputs.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = 1u32 << attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(exp)
    }
}
