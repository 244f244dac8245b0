use std::{fmt::Display, future::Future, time::Duration};

use thiserror::Error;

use super::backoff::Backoff;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(500))
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(attempts: u32, base_delay: Duration) -> Self {
        Self {
            attempts,
            base_delay,
            max_delay: base_delay.saturating_mul(8),
        }
    }
}

#[derive(Debug, Error)]
#[error("gave up after {attempts} attempt(s): {last}")]
pub struct RetryError<E> {
    pub attempts: u32,
    pub last: E,
}

impl<E> RetryError<E> {
    pub fn into_last(self) -> E {
        self.last
    }
}

/// Runs `operation` until it succeeds or `policy.attempts` runs out, sleeping
/// with exponential backoff in between. The closure receives the 1-based
/// attempt number.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = policy.attempts.max(1);
    let mut backoff = Backoff::new(policy.base_delay, policy.max_delay);
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(last) if attempt >= attempts => {
                return Err(RetryError {
                    attempts: attempt,
                    last,
                });
            }
            Err(err) => {
                let delay = backoff.next_delay();
                tracing::debug!(
                    attempt,
                    attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
