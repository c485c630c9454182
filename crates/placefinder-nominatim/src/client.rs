//! HTTP gateway for the Nominatim API.
//!
//! Wraps `reqwest` with the provider's politeness rules: one request in
//! flight per process, a pause before each request, an identifying
//! `User-Agent`, and `jsonv2` responses throughout.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use placefinder_core::AppConfig;
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::cancel::CancelToken;
use crate::error::NominatimError;
use crate::limiter::{FixedDelay, RateLimiter};
use crate::retry::{retry_with_backoff, RetryPolicy};

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// Held across the limiter pause and the HTTP exchange by every client in
/// the process, however it was constructed.
static REQUEST_GATE: LazyLock<Arc<Mutex<()>>> = LazyLock::new(|| Arc::new(Mutex::new(())));

/// Characters left bare when encoding a list item, matching what browsers
/// leave alone in `encodeURIComponent` (the list separator `,` is added
/// unencoded by the caller).
pub(crate) const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Client for the Nominatim search and lookup endpoints.
///
/// All clients share one process-wide single-flight gate, so at most one
/// Nominatim request is in flight at a time. Clones also share the rate
/// limiter; cloning is cheap.
/// Use [`NominatimClient::new`] for production or
/// [`NominatimClient::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: Url,
    email: Option<String>,
    limiter: Arc<dyn RateLimiter>,
    gate: Arc<Mutex<()>>,
    retry: RetryPolicy,
    pub(crate) cancel: CancelToken,
}

impl std::fmt::Debug for NominatimClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimClient")
            .field("base_url", &self.base_url.as_str())
            .field("email", &self.email.as_ref().map(|_| "[redacted]"))
            .field("retry", &self.retry)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl NominatimClient {
    /// Creates a client pointed at the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`NominatimError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self, NominatimError> {
        Self::with_base_url(DEFAULT_BASE_URL, user_agent, timeout_secs)
    }

    /// Creates a client with a custom base URL (for testing with wiremock or a
    /// self-hosted instance).
    ///
    /// # Errors
    ///
    /// Returns [`NominatimError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`NominatimError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        user_agent: &str,
        timeout_secs: u64,
    ) -> Result<Self, NominatimError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so that joining "search" appends a path
        // segment instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| NominatimError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            email: None,
            limiter: Arc::new(FixedDelay::default()),
            gate: Arc::clone(&REQUEST_GATE),
            retry: RetryPolicy::none(),
            cancel: CancelToken::new(),
        })
    }

    /// Builds a client from application configuration.
    ///
    /// # Errors
    ///
    /// See [`NominatimClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, NominatimError> {
        let client = Self::with_base_url(
            &config.nominatim_base_url,
            &config.nominatim_user_agent,
            config.nominatim_timeout_secs,
        )?
        .with_rate_limiter(Arc::new(FixedDelay::new(Duration::from_millis(
            config.nominatim_request_delay_ms,
        ))))
        .with_retry_policy(RetryPolicy::new(
            config.nominatim_max_retries,
            config.nominatim_retry_backoff_base_ms,
        ));

        Ok(match &config.nominatim_email {
            Some(email) => client.with_email(email),
            None => client,
        })
    }

    /// Replaces the pre-request limiter. The single-flight gate is kept.
    #[must_use]
    pub fn with_rate_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sends `email=<address>` with every request.
    #[must_use]
    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_owned());
        self
    }

    /// Returns a clone bound to `token`. Requests and area-search rounds made
    /// through the clone fail with [`NominatimError::Cancelled`] once the
    /// token fires; other clones are unaffected.
    #[must_use]
    pub fn with_cancellation(&self, token: CancelToken) -> Self {
        let mut bound = self.clone();
        bound.cancel = token;
        bound
    }

    /// Builds an endpoint URL with `format=jsonv2`, the optional contact
    /// email, and `params`, all percent-encoded.
    pub(crate) fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&format!("{}{endpoint}", self.base_url.path()));
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("format", "jsonv2");
            if let Some(email) = &self.email {
                pairs.append_pair("email", email);
            }
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Appends `key=value` where `value` is already encoded, so list
    /// separators stay literal commas.
    pub(crate) fn append_encoded_param(url: &mut Url, key: &str, encoded: &str) {
        let query = match url.query() {
            Some(q) if !q.is_empty() => format!("{q}&{key}={encoded}"),
            _ => format!("{key}={encoded}"),
        };
        url.set_query(Some(&query));
    }

    /// Sends a GET through the shared gate and parses the body as JSON.
    ///
    /// Retries only when the client's [`RetryPolicy`] allows it; each attempt
    /// waits its own turn at the gate.
    ///
    /// # Errors
    ///
    /// - [`NominatimError::Cancelled`] if the bound token fires first.
    /// - [`NominatimError::Http`] on network failure.
    /// - [`NominatimError::UnexpectedStatus`] on a non-2xx status.
    /// - [`NominatimError::Deserialize`] if the body is not valid JSON.
    pub(crate) async fn request_json(
        &self,
        url: &Url,
        endpoint: &str,
    ) -> Result<serde_json::Value, NominatimError> {
        retry_with_backoff(self.retry, || self.request_once(url, endpoint)).await
    }

    async fn request_once(
        &self,
        url: &Url,
        endpoint: &str,
    ) -> Result<serde_json::Value, NominatimError> {
        if self.cancel.is_cancelled() {
            return Err(NominatimError::Cancelled);
        }

        let exchange = async {
            let _turn = self.gate.lock().await;
            self.limiter.wait().await;

            tracing::debug!(endpoint, url = %url, "sending Nominatim request");
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(NominatimError::UnexpectedStatus {
                    status: status.as_u16(),
                    endpoint: endpoint.to_owned(),
                });
            }

            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| NominatimError::Deserialize {
                context: endpoint.to_owned(),
                source: e,
            })
        };

        tokio::select! {
            () = self.cancel.cancelled() => Err(NominatimError::Cancelled),
            result = exchange => result,
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
