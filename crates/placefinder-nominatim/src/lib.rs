//! Rate-limited client for the Nominatim geocoding API.
//!
//! Every request made through any [`NominatimClient`] passes through one
//! process-wide gate, so at most one request is in flight at a time and each
//! is preceded by the configured [`RateLimiter`] pause.

mod area_search;
mod cancel;
mod client;
mod error;
mod limiter;
mod lookup;
mod normalize;
mod retry;
pub mod types;

pub use area_search::{MAX_SEARCH_ROUNDS, MIN_SEARCH_ROUNDS, SEARCH_PAGE_SIZE};
pub use cancel::CancelToken;
pub use client::NominatimClient;
pub use error::NominatimError;
pub use limiter::{FixedDelay, RateLimiter};
pub use lookup::LOOKUP_BATCH_SIZE;
pub use retry::RetryPolicy;
pub use types::NominatimPlace;
