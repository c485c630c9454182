use placefinder_core::ValidationError;
use thiserror::Error;

/// Errors returned by the Nominatim client.
#[derive(Debug, Error)]
pub enum NominatimError {
    /// Caller input was rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Nominatim answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A lookup chunk rendered to an empty id list. Indicates a batching bug.
    #[error("lookup chunk {chunk_index} produced an empty osm_ids parameter")]
    EmptyBatch { chunk_index: usize },

    #[error("expected exactly {expected} result(s) for {context}, got {actual}")]
    UnexpectedResultCount {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("geocoding request cancelled")]
    Cancelled,

    #[error("invalid Nominatim base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl NominatimError {
    /// `true` for transport, status, and payload failures of the provider.
    ///
    /// Callers present these as "search currently unavailable" rather than
    /// as actionable input errors.
    #[must_use]
    pub fn is_gateway(&self) -> bool {
        matches!(
            self,
            NominatimError::Http(_)
                | NominatimError::UnexpectedStatus { .. }
                | NominatimError::Deserialize { .. }
        )
    }
}
