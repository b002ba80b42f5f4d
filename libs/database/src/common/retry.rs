use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Fixed-delay retry policy for startup connections
///
/// Every attempt is separated by the same `delay`; there is no backoff and no
/// jitter. `max_attempts` counts the first attempt too, so a budget of 1 means
/// "try once, never wait".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,

    /// Pause between two consecutive attempts
    pub delay: Duration,
}

impl RetryConfig {
    /// Create a retry configuration with defaults
    ///
    /// Defaults:
    /// - max_attempts: 10
    /// - delay: 10s
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Delay to wait after `failed_attempts` failures, or `None` once the
    /// budget is spent.
    pub fn next_delay(&self, failed_attempts: u32) -> Option<Duration> {
        (failed_attempts < self.max_attempts).then_some(self.delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_secs(10),
        }
    }
}

/// Returned when every attempt of [`retry_with_fixed_delay`] failed
#[derive(Debug, thiserror::Error)]
#[error("gave up after {attempts} attempt(s): {last_error}")]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

/// Retry an async operation with a fixed pause between attempts
///
/// The operation receives the 1-based attempt number. Attempts are strictly
/// sequential. At least one attempt is always made, and no pause follows the
/// final failure.
///
/// # Example
/// ```ignore
/// use database::common::{RetryConfig, retry_with_fixed_delay};
///
/// let config = RetryConfig::new().with_max_attempts(5);
/// let session = retry_with_fixed_delay(|_| cassandra::connect(&conn), &config).await?;
/// ```
pub async fn retry_with_fixed_delay<F, Fut, T, E>(
    mut operation: F,
    config: &RetryConfig,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    debug!("Operation succeeded on attempt {}", attempt);
                }
                return Ok(value);
            }
            Err(e) => match config.next_delay(attempt) {
                Some(delay) => {
                    warn!(
                        "Attempt {}/{} failed: {}. Retrying in {:?}",
                        attempt, config.max_attempts, e, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    warn!("Giving up after {} attempt(s): {}", attempt, e);
                    return Err(RetryExhausted {
                        attempts: attempt,
                        last_error: e,
                    });
                }
            },
        }
    }
}
