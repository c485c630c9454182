//! Opt-in retry with exponential back-off and jitter for gateway calls.
//!
//! The default [`RetryPolicy`] performs no retries: a failed request surfaces
//! to the caller immediately. Callers that want resilience opt in with
//! [`RetryPolicy::new`]. Validation, cancellation, and batching errors are
//! never retried regardless of policy.

use std::future::Future;
use std::time::Duration;

use crate::error::NominatimError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure.
    pub max_retries: u32,
    /// Base delay; the n-th retry waits `backoff_base_ms * 2^(n-1)` ± 25 %.
    pub backoff_base_ms: u64,
}

impl RetryPolicy {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            backoff_base_ms: 0,
        }
    }

    #[must_use]
    pub const fn new(max_retries: u32, backoff_base_ms: u64) -> Self {
        Self {
            max_retries,
            backoff_base_ms,
        }
    }
}

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** timeouts, connection failures, HTTP 429, HTTP 5xx.
///
/// **Not retriable:** everything else, including other 4xx statuses,
/// malformed payloads, validation errors, and cancellation.
pub(crate) fn is_retriable(err: &NominatimError) -> bool {
    match err {
        NominatimError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        NominatimError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        NominatimError::Validation(_)
        | NominatimError::Deserialize { .. }
        | NominatimError::EmptyBatch { .. }
        | NominatimError::UnexpectedResultCount { .. }
        | NominatimError::Cancelled
        | NominatimError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation`, retrying transient failures according to `policy`.
///
/// Delay is capped at 60 s. With [`RetryPolicy::none`] the operation runs
/// exactly once.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, NominatimError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, NominatimError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= policy.max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = policy
                    .backoff_base_ms
                    .saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms,
                    error = %err,
                    "Nominatim transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
