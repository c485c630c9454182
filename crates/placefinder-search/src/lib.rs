//! Text and distance search over a read-only catalog of places.
//!
//! Queries are tokenized by [`normalize_search_query`], every catalog place is
//! scored by [`compute_search_match_score`], and [`PlaceSearch`] composes the
//! three public entry points on top of a [`PlaceCatalog`] snapshot.

pub mod catalog;
pub mod error;
pub mod orchestrator;
pub mod query;
pub mod scorer;

pub use catalog::{CatalogError, PlaceCatalog, StaticCatalog};
pub use error::SearchError;
pub use orchestrator::{DistanceOrder, PlaceSearch, FIND_ALL_NEAR_ORDER};
pub use query::{normalize_search_query, state_name};
pub use scorer::compute_search_match_score;
