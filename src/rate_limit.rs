//! Rate-limit detection and retry policy.
//!
//! The API signals throttling with `503 Service Unavailable` plus an
//! `X-RateLimit-Reset` header, or `429 Too Many Requests` plus `Retry-After`.
//! Header values are either a Unix timestamp or a relative number of seconds.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::header::{HeaderMap, HeaderName, RETRY_AFTER};
use reqwest::{Method, StatusCode};

/// Header carrying the reset time on `503` responses.
pub const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Header values at or above this are Unix timestamps, not relative seconds.
const EPOCH_THRESHOLD: u64 = 1_000_000_000;

/// Outcome of [`RateLimitPolicy::decide`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryDecision {
    pub retry: bool,
    pub delay: Duration,
}

impl RetryDecision {
    const STOP: Self = Self {
        retry: false,
        delay: Duration::ZERO,
    };

    fn after(delay: Duration) -> Self {
        Self { retry: true, delay }
    }
}

/// Decides whether a throttled request may be retried and how long to wait.
///
/// The delay ceiling is adaptive: whenever a computed delay exceeds it, the
/// delay is clamped and the ceiling doubles for every later decision made by
/// the same policy.
#[derive(Debug)]
pub struct RateLimitPolicy {
    default_delay: Duration,
    max_delay_ms: AtomicU64,
}

impl RateLimitPolicy {
    pub fn new(default_delay: Duration, initial_max_delay: Duration) -> Self {
        Self {
            default_delay,
            max_delay_ms: AtomicU64::new(duration_ms(initial_max_delay)),
        }
    }

    /// Current value of the adaptive delay ceiling.
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms.load(Ordering::SeqCst))
    }

    /// Inspects a response and returns the retry decision.
    ///
    /// Idempotent methods are always retried on a throttling status, falling
    /// back to the default delay when the header is missing or malformed. A
    /// `POST` is retried only when the server sent a well-formed delay.
    pub fn decide(
        &self,
        method: &Method,
        status: StatusCode,
        headers: &HeaderMap,
        now: SystemTime,
    ) -> RetryDecision {
        let header_name = match status {
            StatusCode::SERVICE_UNAVAILABLE => HeaderName::from_static(RATE_LIMIT_RESET),
            StatusCode::TOO_MANY_REQUESTS => RETRY_AFTER,
            _ => return RetryDecision::STOP,
        };
        let idempotent = is_idempotent(method);
        let raw = headers
            .get(&header_name)
            .and_then(|value| value.to_str().ok());

        match raw.and_then(|value| parse_delay(value, now)) {
            Some(delay) if idempotent || *method == Method::POST => {
                RetryDecision::after(self.clamp(delay))
            }
            Some(_) => RetryDecision::STOP,
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    "got {} response, but no usable {} header ({:?})",
                    status,
                    header_name.as_str(),
                    raw
                );
                if idempotent {
                    RetryDecision::after(self.clamp(self.default_delay))
                } else {
                    RetryDecision::STOP
                }
            }
        }
    }

    fn clamp(&self, delay: Duration) -> Duration {
        let delay_ms = duration_ms(delay);
        let hit = self
            .max_delay_ms
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |ceiling| {
                (delay_ms > ceiling).then(|| ceiling.saturating_mul(2))
            });
        match hit {
            Ok(ceiling) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    "rate-limit delay of {} ms clamped to {} ms, raising ceiling to {} ms",
                    delay_ms,
                    ceiling,
                    ceiling.saturating_mul(2)
                );
                Duration::from_millis(ceiling)
            }
            Err(_) => delay,
        }
    }
}

/// Returns `true` for methods that are safe to repeat.
pub fn is_idempotent(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::PUT | Method::DELETE | Method::OPTIONS | Method::TRACE
    )
}

fn parse_delay(raw: &str, now: SystemTime) -> Option<Duration> {
    let value = raw.trim().parse::<u64>().ok()?;
    if value >= EPOCH_THRESHOLD {
        let reset = UNIX_EPOCH + Duration::from_secs(value);
        Some(reset.duration_since(now).unwrap_or(Duration::ZERO))
    } else {
        Some(Duration::from_secs(value))
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
