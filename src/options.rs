use std::time::Duration;

/// Environment variable overriding [`ClientOptions::decode_prefix_len`].
pub const DECODE_PREFIX_LEN_ENV: &str = "QUIP_DECODE_PREFIX_LEN";

/// Default number of payload bytes quoted in decode errors.
pub const DEFAULT_DECODE_PREFIX_LEN: usize = 20;

/// Configures HTTP timeout, retry and diagnostic behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of requests sent for one logical call, retries included.
    pub max_attempts: u32,
    /// Wait used for idempotent requests when the throttling header is
    /// missing or malformed.
    pub default_retry_delay: Duration,
    /// Starting value of the adaptive rate-limit ceiling.
    pub initial_max_retry_delay: Duration,
    /// Number of payload bytes quoted in decode errors.
    pub decode_prefix_len: usize,
    /// Initial minimum spacing between two requests sent by the client and its
    /// clones; see `QuipClient::with_throttle`.
    pub throttle_interval: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            max_attempts: 3,
            default_retry_delay: Duration::from_secs(5),
            initial_max_retry_delay: Duration::from_secs(60),
            decode_prefix_len: DEFAULT_DECODE_PREFIX_LEN,
            throttle_interval: None,
        }
    }
}

impl ClientOptions {
    /// Returns the defaults with environment overrides applied.
    ///
    /// Reads `QUIP_DECODE_PREFIX_LEN`; unset or unparsable values keep the
    /// default of 20 bytes.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Some(len) = parse_prefix_len(std::env::var(DECODE_PREFIX_LEN_ENV).ok().as_deref()) {
            options.decode_prefix_len = len;
        }
        options
    }
}

fn parse_prefix_len(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
}

#[cfg(test)]
mod tests {
    use super::{parse_prefix_len, ClientOptions};
    use std::time::Duration;

    #[test]
    fn defaults_match_api_guidance() {
        let options = ClientOptions::default();
        assert_eq!(options.max_attempts, 3);
        assert_eq!(options.default_retry_delay, Duration::from_secs(5));
        assert_eq!(options.initial_max_retry_delay, Duration::from_secs(60));
        assert_eq!(options.decode_prefix_len, 20);
        assert!(options.throttle_interval.is_none());
    }

    #[test]
    fn prefix_len_parsing() {
        assert_eq!(parse_prefix_len(Some("64")), Some(64));
        assert_eq!(parse_prefix_len(Some(" 8 ")), Some(8));
        assert_eq!(parse_prefix_len(Some("lots")), None);
        assert_eq!(parse_prefix_len(None), None);
    }
}
