pub mod app_config;
pub mod catalog;
pub mod config;
pub mod geo;
pub mod osm;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, CatalogFile, CatalogPlace, PlaceLocation};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{
    compute_bounding_box, distance_between_points_miles, haversine_distance_miles,
    normalize_longitude, padded_radius_miles, parse_latitude, parse_search_radius, BoundingBox,
    BoxCorner, GeoPoint, SearchRadius,
};
pub use osm::{
    parse_osm_class, parse_osm_id, parse_osm_id_str, parse_osm_type, OsmReference, OsmType,
};

use thiserror::Error;

/// Input validation failures.
///
/// Raised synchronously before any network or catalog access. Callers recover
/// by supplying corrected input; these are never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid OSM type \"{0}\": expected node, way, relation, N, W, or R")]
    InvalidOsmType(String),

    #[error("invalid OSM id: {0}")]
    InvalidOsmId(String),

    #[error("invalid OSM class: {0}")]
    InvalidOsmClass(String),

    #[error("invalid latitude {0}: must be within [-90, 90]")]
    InvalidLatitude(f64),

    #[error("invalid longitude {0}: must be a finite number")]
    InvalidLongitude(f64),

    #[error("invalid search radius {0}: must be within [0.1, 400] miles")]
    InvalidRadius(f64),

    #[error("invalid search query: {0}")]
    InvalidQuery(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation error: {0}")]
    Validation(String),
}
