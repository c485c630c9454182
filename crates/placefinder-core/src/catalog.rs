use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceLocation {
    #[serde(default)]
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// A catalog place as handed to the search core. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPlace {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub location: PlaceLocation,
}

impl CatalogPlace {
    /// Validated coordinates of this place.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`crate::ValidationError`] when the stored
    /// latitude or longitude is invalid.
    pub fn point(&self) -> Result<GeoPoint, crate::ValidationError> {
        GeoPoint::new(self.location.latitude, self.location.longitude)
    }
}

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub places: Vec<CatalogPlace>,
}

/// Load and validate a catalog snapshot from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<CatalogFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: CatalogFile = serde_yaml::from_str(&content)?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn validate_catalog(catalog: &CatalogFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for place in &catalog.places {
        if place.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "place id must be non-empty".to_string(),
            ));
        }

        if !seen_ids.insert(place.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate place id: '{}'",
                place.id
            )));
        }

        place.point().map_err(|e| {
            ConfigError::Validation(format!("place '{}' has bad coordinates: {e}", place.id))
        })?;
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
