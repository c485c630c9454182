//! Read port for the place catalog.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use placefinder_core::{load_catalog, CatalogFile, CatalogPlace, ConfigError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to load catalog: {0}")]
    Load(#[from] ConfigError),

    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Source of catalog place snapshots.
///
/// Search never mutates the catalog, so implementations may be read by any
/// number of searches at once.
pub trait PlaceCatalog: Send + Sync {
    fn fetch_places(
        &self,
    ) -> impl Future<Output = Result<Vec<CatalogPlace>, CatalogError>> + Send;
}

/// In-memory catalog snapshot, typically loaded once from YAML.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    places: Arc<[CatalogPlace]>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new(places: Vec<CatalogPlace>) -> Self {
        Self {
            places: places.into(),
        }
    }

    /// Loads and validates a YAML catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Load`] if the file cannot be read, parsed, or
    /// fails validation.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let catalog = load_catalog(path)?;
        tracing::debug!(
            path = %path.display(),
            places = catalog.places.len(),
            "catalog loaded"
        );
        Ok(catalog.into())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl From<CatalogFile> for StaticCatalog {
    fn from(file: CatalogFile) -> Self {
        Self::new(file.places)
    }
}

impl PlaceCatalog for StaticCatalog {
    fn fetch_places(
        &self,
    ) -> impl Future<Output = Result<Vec<CatalogPlace>, CatalogError>> + Send {
        let places = self.places.to_vec();
        async move { Ok(places) }
    }
}
