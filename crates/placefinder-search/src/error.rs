use placefinder_core::ValidationError;
use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("catalog read failed: {0}")]
    Catalog(#[from] CatalogError),
}
