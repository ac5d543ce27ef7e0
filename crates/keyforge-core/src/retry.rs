//! Retry with exponential backoff
//!
//! [`retry`] runs an async operation, sleeping and trying again whenever it
//! fails with an error the caller marks as retryable. The last attempt's
//! outcome is handed back untouched.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

/// Number of attempts for the deck listing request
const DEFAULT_TRIES: u32 = 5;

/// Wait before the first retry (in seconds)
const DEFAULT_DELAY_SECS: u64 = 60;

/// Multiplier applied to the wait after each retry
const DEFAULT_BACKOFF: u32 = 2;

/// How often and how patiently to retry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, not retries. Values below 2 mean a single attempt.
    pub tries: u32,
    /// Wait before the first retry
    pub delay: Duration,
    /// Factor the wait grows by after every retry
    pub backoff: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            tries: DEFAULT_TRIES,
            delay: Duration::from_secs(DEFAULT_DELAY_SECS),
            backoff: DEFAULT_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// Policy that never waits between attempts
    pub fn immediate(tries: u32) -> Self {
        Self {
            tries,
            delay: Duration::ZERO,
            backoff: DEFAULT_BACKOFF,
        }
    }

    /// Waits the policy would sleep if every attempt but the last failed
    pub fn delays(&self) -> Vec<Duration> {
        let mut delays = Vec::new();
        let mut delay = self.delay;
        for _ in 1..self.tries {
            delays.push(delay);
            delay = delay.saturating_mul(self.backoff);
        }
        delays
    }
}

/// Run `operation` under `policy`, retrying errors for which `is_retryable`
/// holds.
///
/// # Example
/// ```
/// use keyforge_core::retry::{retry, RetryPolicy};
///
/// # async fn example() {
/// let result: Result<u32, String> =
///     retry(&RetryPolicy::immediate(3), |_| true, || async { Ok(7) }).await;
/// assert_eq!(result, Ok(7));
/// # }
/// ```
pub async fn retry<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    is_retryable: P,
    operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    retry_with_sleep(policy, is_retryable, operation, sleep).await
}

/// [`retry`] with a caller-supplied wait between attempts.
pub async fn retry_with_sleep<T, E, F, Fut, P, S, SFut>(
    policy: &RetryPolicy,
    is_retryable: P,
    mut operation: F,
    mut wait: S,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
    S: FnMut(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    let mut remaining = policy.tries;
    let mut delay = policy.delay;

    while remaining > 1 {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if is_retryable(&error) => {
                warn!("{}, Retrying in {} seconds...", error, delay.as_secs());
                wait(delay).await;
                remaining -= 1;
                delay = delay.saturating_mul(policy.backoff);
            }
            Err(error) => return Err(error),
        }
    }

    operation().await
}
