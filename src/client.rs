use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::{sleep, sleep_until, Instant};

use crate::decode::{decode_array, decode_keyed, decode_object};
use crate::rate_limit::RateLimitPolicy;
use crate::{ClientOptions, Params, QuipError, Result};

/// Default API host.
pub const DEFAULT_API_URL: &str = "https://platform.quip.com";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// OAuth application credentials kept alongside the access token.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// Payload of an outgoing request.
#[derive(Clone, Debug)]
pub enum RequestBody {
    Empty,
    /// Form-encoded parameters.
    Form(Params),
    /// Single multipart file part named `blob`.
    Upload { file_name: String, bytes: Bytes },
}

/// A request handed to [`QuipClient::execute`].
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub body: RequestBody,
}

impl RequestDescriptor {
    /// GET request; non-empty parameters become the query string.
    pub fn get(url: impl Into<String>, params: &Params) -> Self {
        let mut url = url.into();
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.encode());
        }
        Self {
            method: Method::GET,
            url,
            body: RequestBody::Empty,
        }
    }

    /// POST request with a form-encoded body.
    pub fn post_form(url: impl Into<String>, params: Params) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            body: RequestBody::Form(params),
        }
    }

    /// POST request with a multipart file upload.
    pub fn post_upload(url: impl Into<String>, file_name: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            body: RequestBody::Upload {
                file_name: file_name.into(),
                bytes,
            },
        }
    }
}

/// State shared by a client and all of its clones.
#[derive(Debug)]
struct SharedState {
    policy: RateLimitPolicy,
    total_delay_ms: AtomicU64,
    /// Client-side throttle spacing; zero disables it.
    throttle_ms: AtomicU64,
    next_slot: Mutex<Option<Instant>>,
}

impl SharedState {
    fn new(options: &ClientOptions) -> Self {
        Self {
            policy: RateLimitPolicy::new(
                options.default_retry_delay,
                options.initial_max_retry_delay,
            ),
            total_delay_ms: AtomicU64::new(0),
            throttle_ms: AtomicU64::new(options.throttle_interval.map_or(0, duration_ms)),
            next_slot: Mutex::new(None),
        }
    }

    fn throttle_interval(&self) -> Option<Duration> {
        match self.throttle_ms.load(Ordering::SeqCst) {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Any status from 400 up, including non-standard codes above 599.
fn is_error_status(status: StatusCode) -> bool {
    status.as_u16() >= 400
}

#[derive(Clone)]
/// HTTP client for the Quip REST API.
///
/// Every request goes through [`QuipClient::execute`], which injects the
/// bearer token and retries throttled requests.
pub struct QuipClient {
    http: reqwest::Client,
    api_url: String,
    authorization: String,
    oauth: Option<OAuthCredentials>,
    options: ClientOptions,
    state: Arc<SharedState>,
}

impl fmt::Debug for QuipClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuipClient")
            .field("api_url", &self.api_url)
            .field("authorization", &"<redacted>")
            .field("oauth", &self.oauth)
            .field("options", &self.options)
            .finish()
    }
}

impl QuipClient {
    /// Creates a client from an access token.
    ///
    /// If the token is missing the `Bearer ` prefix, it is added automatically.
    /// Options are read with [`ClientOptions::from_env`].
    pub fn new(access_token: impl AsRef<str>) -> Self {
        let options = ClientOptions::from_env();
        Self {
            http: reqwest::Client::new(),
            api_url: DEFAULT_API_URL.to_owned(),
            authorization: normalize_bearer_authorization(access_token.as_ref()),
            oauth: None,
            state: Arc::new(SharedState::new(&options)),
            options,
        }
    }

    /// Creates a client that also carries OAuth application credentials.
    pub fn new_oauth(
        access_token: impl AsRef<str>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        let mut client = Self::new(access_token);
        client.oauth = Some(OAuthCredentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        });
        client
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `QUIP_ACCESS_TOKEN` — access token (Bearer prefix optional)
    /// - `QUIP_API_URL` — optional API host, defaults to [`DEFAULT_API_URL`]
    ///
    /// Returns an error if the token is missing or empty.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use quip_http::QuipClient;
    ///
    /// let quip = QuipClient::from_env().expect("missing QUIP_ACCESS_TOKEN");
    /// ```
    pub fn from_env() -> std::result::Result<Self, String> {
        let token = std::env::var("QUIP_ACCESS_TOKEN")
            .map_err(|_| "missing QUIP_ACCESS_TOKEN environment variable".to_owned())?;
        if token.trim().is_empty() {
            return Err("QUIP_ACCESS_TOKEN is set but empty".to_owned());
        }
        let client = Self::new(token);
        match std::env::var("QUIP_API_URL") {
            Ok(url) if !url.trim().is_empty() => Ok(client.with_api_url(url.trim())),
            _ => Ok(client),
        }
    }

    /// Replaces the API host, e.g. `https://platform.quip.com`.
    pub fn set_api_url(&mut self, url: impl Into<String>) {
        self.api_url = url.into().trim_end_matches('/').to_owned();
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.set_api_url(url);
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Applies client options.
    ///
    /// `opts` replaces the current options wholesale, including any
    /// `QUIP_DECODE_PREFIX_LEN` override picked up by [`QuipClient::new`]; start
    /// from [`ClientOptions::from_env`] to keep it. Resets the adaptive
    /// rate-limit ceiling, the delay counter and the throttle, and detaches the
    /// client from clones made earlier.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.state = Arc::new(SharedState::new(&opts));
        self.options = opts;
        self
    }

    /// Spaces consecutive requests at least `interval` apart. A zero
    /// interval disables throttling.
    ///
    /// The interval is shared with every clone of this client, including
    /// clones made before the call.
    pub fn with_throttle(mut self, interval: Duration) -> Self {
        self.state
            .throttle_ms
            .store(duration_ms(interval), Ordering::SeqCst);
        self.options.throttle_interval = (!interval.is_zero()).then_some(interval);
        self
    }

    /// Current client-side throttle interval, if any.
    pub fn throttle_interval(&self) -> Option<Duration> {
        self.state.throttle_interval()
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn oauth_credentials(&self) -> Option<&OAuthCredentials> {
        self.oauth.as_ref()
    }

    /// Total time spent waiting on rate limits by this client and its clones.
    pub fn total_rate_limit_delay(&self) -> Duration {
        Duration::from_millis(self.state.total_delay_ms.load(Ordering::SeqCst))
    }

    /// Current adaptive ceiling applied to rate-limit delays.
    pub fn max_retry_delay(&self) -> Duration {
        self.state.policy.max_delay()
    }

    /// Builds the full URL of an API resource path.
    pub fn resource_url(&self, path: &str) -> String {
        format!("{}/1/{}", self.api_url, path)
    }

    /// Sends a request and returns the raw response body.
    ///
    /// Throttled requests are retried while the rate-limit policy allows it,
    /// up to [`ClientOptions::max_attempts`] requests in total. Transport
    /// failures are returned immediately.
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<Bytes> {
        let mut attempt = 1u32;
        loop {
            self.wait_for_slot().await;

            #[cfg(feature = "tracing")]
            tracing::debug!("{} {} (attempt {})", request.method, request.url, attempt);

            let response = self
                .build_request(request)
                .send()
                .await
                .map_err(QuipError::Transport)?;
            let status = response.status();
            let decision = self.state.policy.decide(
                &request.method,
                status,
                response.headers(),
                SystemTime::now(),
            );

            if decision.retry {
                if attempt >= self.options.max_attempts {
                    return Err(QuipError::RateLimited {
                        method: request.method.clone(),
                        url: request.url.clone(),
                        status,
                        attempts: attempt,
                    });
                }

                #[cfg(feature = "tracing")]
                tracing::info!(
                    "delaying {} {} for {} ms due to rate limit",
                    request.method,
                    request.url,
                    decision.delay.as_millis()
                );

                sleep(decision.delay).await;
                self.record_delay(decision.delay);
                attempt += 1;
                continue;
            }

            let body = response.bytes().await.map_err(QuipError::Transport)?;
            if is_error_status(status) {
                return Err(QuipError::Http {
                    status,
                    method: request.method.clone(),
                    url: request.url.clone(),
                    body: String::from_utf8_lossy(&body).into_owned(),
                });
            }
            return Ok(body);
        }
    }

    pub(crate) async fn get_bytes(&self, path: &str, params: &Params) -> Result<Bytes> {
        let request = RequestDescriptor::get(self.resource_url(path), params);
        self.execute(&request).await
    }

    pub(crate) async fn get_object<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Params,
    ) -> Result<T> {
        let body = self.get_bytes(path, params).await?;
        decode_object(&body, self.options.decode_prefix_len)
    }

    pub(crate) async fn get_array<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Params,
    ) -> Result<Vec<T>> {
        let body = self.get_bytes(path, params).await?;
        decode_array(&body, self.options.decode_prefix_len)
    }

    pub(crate) async fn get_keyed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &Params,
    ) -> Result<Vec<T>> {
        let body = self.get_bytes(path, params).await?;
        decode_keyed(&body, self.options.decode_prefix_len)
    }

    pub(crate) async fn post_object<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
    ) -> Result<T> {
        let request = RequestDescriptor::post_form(self.resource_url(path), params);
        let body = self.execute(&request).await?;
        decode_object(&body, self.options.decode_prefix_len)
    }

    pub(crate) async fn upload_object<T: DeserializeOwned>(
        &self,
        path: &str,
        file_name: String,
        bytes: Bytes,
    ) -> Result<T> {
        let request = RequestDescriptor::post_upload(self.resource_url(path), file_name, bytes);
        let body = self.execute(&request).await?;
        decode_object(&body, self.options.decode_prefix_len)
    }

    fn build_request(&self, request: &RequestDescriptor) -> RequestBuilder {
        let builder = self
            .http
            .request(request.method.clone(), &request.url)
            .header(AUTHORIZATION, &self.authorization)
            .timeout(Duration::from_millis(self.options.timeout_ms));

        match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(params) => builder
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(params.encode()),
            RequestBody::Upload { file_name, bytes } => {
                // Multipart forms are consumed on send, so each attempt builds its own.
                let part = Part::bytes(bytes.to_vec()).file_name(file_name.clone());
                builder.multipart(Form::new().part("blob", part))
            }
        }
    }

    /// Waits until the client-side throttle allows the next request.
    async fn wait_for_slot(&self) {
        let Some(interval) = self.state.throttle_interval() else {
            return;
        };
        let mut next_slot = self.state.next_slot.lock().await;
        if let Some(at) = *next_slot {
            if at > Instant::now() {
                sleep_until(at).await;
            }
        }
        *next_slot = Some(Instant::now() + interval);
    }

    fn record_delay(&self, delay: Duration) {
        self.state
            .total_delay_ms
            .fetch_add(duration_ms(delay), Ordering::SeqCst);
    }
}

fn normalize_bearer_authorization(token: &str) -> String {
    let trimmed = token.trim();
    let prefix = trimmed.get(..7);
    if prefix.is_some_and(|value| value.eq_ignore_ascii_case("bearer ")) {
        trimmed.to_owned()
    } else {
        format!("Bearer {trimmed}")
    }
}
