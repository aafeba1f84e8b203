use reqwest::{Method, StatusCode};

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum QuipError {
    /// A required request parameter was missing or empty. Raised before any
    /// network call is made.
    #[error("validation error: {0}")]
    Validation(String),
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// The server kept throttling after every allowed attempt was used.
    #[error("rate limited ({status}) after {attempts} attempts, in response to {method} {url}")]
    RateLimited {
        method: Method,
        url: String,
        status: StatusCode,
        attempts: u32,
    },
    /// Non-success HTTP status code that was not eligible for retry.
    #[error("{status}, in response to {method} {url}")]
    Http {
        status: StatusCode,
        method: Method,
        url: String,
        /// Raw response body, kept for diagnostics.
        body: String,
    },
    /// Response body did not match the expected JSON shape.
    #[error("cannot decode {type_name} from {len} bytes (starts with {prefix:?}): {source}")]
    Decode {
        type_name: &'static str,
        len: usize,
        /// Leading bytes of the payload, lossily converted to UTF-8.
        prefix: String,
        #[source]
        source: serde_json::Error,
    },
    /// Local file could not be read for upload.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuipError {
    /// Returns the HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RateLimited { status, .. } | Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }
}
