//! Catalog search command handlers.

use std::path::Path;

use placefinder_search::{DistanceOrder, PlaceSearch, StaticCatalog};

use crate::{print_json, AreaArgs};

fn open_catalog(path: &Path) -> anyhow::Result<PlaceSearch<StaticCatalog>> {
    let catalog = StaticCatalog::from_file(path)?;
    tracing::info!(path = %path.display(), places = catalog.len(), "catalog opened");
    Ok(PlaceSearch::new(catalog))
}

pub(crate) async fn run_search(path: &Path, query: &str) -> anyhow::Result<()> {
    let ids = open_catalog(path)?.search(query).await?;
    print_json(&ids)
}

pub(crate) async fn run_search_near(
    path: &Path,
    query: &str,
    area: AreaArgs,
) -> anyhow::Result<()> {
    let ids = open_catalog(path)?
        .search_near(query, area.lat, area.lon, area.radius)
        .await?;
    print_json(&ids)
}

pub(crate) async fn run_near(
    path: &Path,
    area: AreaArgs,
    nearest_first: bool,
) -> anyhow::Result<()> {
    let mut search = open_catalog(path)?;
    if nearest_first {
        search = search.with_near_order(DistanceOrder::NearestFirst);
    }
    let ids = search.find_all_near(area.lat, area.lon, area.radius).await?;
    print_json(&ids)
}
