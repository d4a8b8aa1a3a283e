//! Exponential backoff around a fallible API call.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::errors::ApiError;

/// How many times a call is retried and how long the first pause lasts.
/// Pause before retry `n` (0-based) is `initial_delay * 2^n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl RetryPolicy {
    /// Reads: 4 attempts, pauses of 1s, 2s, 4s.
    pub const fn read() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
        }
    }

    /// Writes retry less: a lost response may hide an applied write.
    pub const fn write() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(1000),
        }
    }

    pub const fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::ZERO,
        }
    }

    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay
            .saturating_mul(2_u32.saturating_pow(attempt))
    }
}

/// Pause between attempts. Swappable so tests can observe backoff.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Runs `call` up to `max_retries + 1` times.
///
/// Errors that are not retryable (4xx, undecodable bodies) return at once.
/// When every attempt fails, the last error is returned.
pub async fn retry_with_backoff<T, F, Fut>(
    operation: &str,
    policy: RetryPolicy,
    sleeper: &dyn Sleeper,
    mut call: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0;

    loop {
        let error = match call().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !error.is_retryable() || attempt >= policy.max_retries {
            return Err(error);
        }

        let delay = policy.delay_for(attempt);
        warn!(
            operation,
            attempt = attempt + 1,
            max_attempts = policy.max_retries + 1,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "API call failed, retrying"
        );
        sleeper.sleep(delay).await;
        attempt += 1;
    }
}
