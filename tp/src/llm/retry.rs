//! Retry with exponential backoff
//!
//! [`RetryPolicy`] owns the schedule; [`send_with_retry`] drives a
//! [`Transport`] through it, sleeping via a [`Sleeper`] so tests can record
//! delays instead of waiting for them.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, error, warn};

use super::{HttpResponse, RequestError, Transport};
use crate::config::RetryConfig;

/// HTTP status the service uses for rate limiting
pub const RATE_LIMITED: u16 = 429;

/// Upper bound for any single backoff delay
pub const MAX_DELAY: Duration = Duration::from_secs(300);

/// Statuses worth another attempt when `retry_all_errors` is off
pub const DEFAULT_RETRYABLE_STATUSES: [u16; 6] = [408, 429, 500, 502, 503, 504];

/// Backoff schedule and retry rules
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Delay before the first retry
    pub base_delay: Duration,

    /// Factor applied to the delay after each retry
    pub multiplier: f64,

    /// Extra random delay as a fraction of the current delay (0 disables)
    pub jitter: f64,

    /// Retry every non-2xx status, not only the listed ones
    pub retry_all_errors: bool,

    /// Statuses retried when `retry_all_errors` is off
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(1000),
            multiplier: 2.0,
            jitter: 0.0,
            retry_all_errors: true,
            retryable_statuses: DEFAULT_RETRYABLE_STATUSES.to_vec(),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: Duration::from_millis(config.base_delay_ms),
            multiplier: config.multiplier,
            jitter: config.jitter,
            retry_all_errors: config.retry_all_errors,
            retryable_statuses: config.retryable_statuses.clone(),
        }
    }
}

impl RetryPolicy {
    /// Should a response with this status be attempted again?
    pub fn is_retryable_status(&self, status: u16) -> bool {
        status == RATE_LIMITED || self.retry_all_errors || self.retryable_statuses.contains(&status)
    }

    /// Delay that follows `delay` in the schedule, capped at [`MAX_DELAY`]
    pub fn next_delay(&self, delay: Duration) -> Duration {
        scaled(delay, self.multiplier.max(1.0))
    }

    /// Un-jittered delays slept between attempts
    pub fn schedule(&self) -> Vec<Duration> {
        let retries = self.max_attempts.saturating_sub(1) as usize;
        std::iter::successors(Some(self.base_delay), |d| Some(self.next_delay(*d)))
            .take(retries)
            .collect()
    }

    /// Apply jitter to a scheduled delay
    fn jittered(&self, delay: Duration) -> Duration {
        if self.jitter.is_nan() || self.jitter <= 0.0 {
            return delay;
        }
        let extra = rand::rng().random_range(0.0..=self.jitter.min(1.0));
        delay.saturating_add(scaled(delay, extra)).min(MAX_DELAY)
    }
}

/// `delay * factor`, saturating at [`MAX_DELAY`] instead of overflowing
fn scaled(delay: Duration, factor: f64) -> Duration {
    Duration::try_from_secs_f64(delay.as_secs_f64() * factor)
        .unwrap_or(MAX_DELAY)
        .min(MAX_DELAY)
}

/// Something that can wait
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real waiting on the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// POST `body` to `url`, retrying per `policy`
///
/// Returns the first 2xx response. A 429 on the final attempt yields
/// [`RequestError::Exhausted`]; any other error on the final attempt is
/// propagated as-is. No delay follows the final attempt.
pub async fn send_with_retry(
    transport: &dyn Transport,
    sleeper: &dyn Sleeper,
    policy: &RetryPolicy,
    url: &str,
    body: &serde_json::Value,
) -> Result<HttpResponse, RequestError> {
    debug!(max_attempts = %policy.max_attempts, "send_with_retry: called");
    let mut delay = policy.base_delay;

    for attempt in 1..=policy.max_attempts {
        let is_last = attempt == policy.max_attempts;

        let failure = match transport.post_json(url, body).await {
            Ok(response) if response.is_success() => {
                debug!(%attempt, status = %response.status, "send_with_retry: success");
                return Ok(response);
            }
            Ok(response) => {
                let status = response.status;
                let err = RequestError::Http {
                    status,
                    message: response.body,
                };
                if err.is_rate_limit() {
                    if is_last {
                        error!(%attempt, "send_with_retry: still rate limited, giving up");
                        return Err(RequestError::Exhausted { attempts: attempt });
                    }
                    warn!(
                        %attempt,
                        delay_ms = delay.as_millis() as u64,
                        "API rate limit hit, retrying"
                    );
                } else if !policy.is_retryable_status(status) {
                    error!(%attempt, %status, "send_with_retry: non-retryable status");
                    return Err(err);
                } else if is_last {
                    error!(%attempt, %status, "send_with_retry: max attempts reached");
                    return Err(err);
                } else {
                    warn!(%attempt, %status, delay_ms = delay.as_millis() as u64, "HTTP error, retrying");
                }
                err
            }
            Err(err) => {
                if !policy.retry_all_errors && !err.is_retryable() {
                    error!(%attempt, error = %err, "send_with_retry: non-retryable error");
                    return Err(err);
                }
                if is_last {
                    error!(%attempt, error = %err, "send_with_retry: max attempts reached");
                    return Err(err);
                }
                warn!(%attempt, error = %err, delay_ms = delay.as_millis() as u64, "Request failed, retrying");
                err
            }
        };

        debug!(%attempt, error = %failure, "send_with_retry: backing off");
        sleeper.sleep(policy.jittered(delay)).await;
        delay = policy.next_delay(delay);
    }

    Err(RequestError::Exhausted {
        attempts: policy.max_attempts,
    })
}
