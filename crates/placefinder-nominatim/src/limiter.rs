//! Pre-request pacing for the Nominatim gateway.
//!
//! Nominatim's usage policy allows one request per second. The client calls
//! [`RateLimiter::wait`] while holding its single-flight gate, so whatever a
//! limiter does here applies to every request in the process.

use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Resolves when the next request may be sent.
    async fn wait(&self);
}

/// Sleeps a fixed interval before every request.
///
/// Not a token bucket: the pause is paid even when the previous request
/// finished long ago.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    /// 1.25 s, comfortably above the provider's 1 req/s limit.
    pub const NOMINATIM_DEFAULT: Duration = Duration::from_millis(1250);

    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No pause at all. For tests against a mock server.
    #[must_use]
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Self::NOMINATIM_DEFAULT)
    }
}

#[async_trait]
impl RateLimiter for FixedDelay {
    async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delay_is_one_and_a_quarter_seconds() {
        assert_eq!(FixedDelay::default().delay(), Duration::from_millis(1250));
    }

    #[tokio::test(start_paused = true)]
    async fn fixed_delay_sleeps_for_configured_interval() {
        let limiter = FixedDelay::new(Duration::from_millis(1250));
        let start = tokio::time::Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(1250));
    }

    #[tokio::test(start_paused = true)]
    async fn none_returns_immediately() {
        let start = tokio::time::Instant::now();
        FixedDelay::none().wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
