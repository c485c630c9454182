//! The public search entry points over a [`PlaceCatalog`].

use placefinder_core::{parse_search_radius, CatalogPlace, GeoPoint};

use crate::catalog::PlaceCatalog;
use crate::error::SearchError;
use crate::query::normalize_search_query;
use crate::scorer::compute_search_match_score;

/// Sort direction for distance-only results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceOrder {
    FarthestFirst,
    NearestFirst,
}

/// Order used by [`PlaceSearch::find_all_near`] unless overridden.
///
/// Farthest first is the established behavior of this operation even though
/// it is unusual for a "near" search. Callers that want nearest first opt in
/// with [`PlaceSearch::with_near_order`].
pub const FIND_ALL_NEAR_ORDER: DistanceOrder = DistanceOrder::FarthestFirst;

/// Ranks catalog places by text relevance and distance.
///
/// All operations return place ids and validate their input before the
/// catalog is read.
#[derive(Debug, Clone)]
pub struct PlaceSearch<C> {
    catalog: C,
    near_order: DistanceOrder,
}

impl<C: PlaceCatalog> PlaceSearch<C> {
    #[must_use]
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            near_order: FIND_ALL_NEAR_ORDER,
        }
    }

    #[must_use]
    pub fn with_near_order(mut self, order: DistanceOrder) -> Self {
        self.near_order = order;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Ids of places matching `query`, most relevant first.
    ///
    /// Places scoring zero are dropped. Equal scores keep the order in which
    /// the catalog returned them.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Validation`] if the query has no searchable terms.
    /// - [`SearchError::Catalog`] if the catalog read fails.
    pub async fn search(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let tokens = normalize_search_query(query)?;
        let ranked = self.ranked(&tokens).await?;
        tracing::info!(
            query,
            tokens = tokens.len(),
            matches = ranked.len(),
            "catalog search complete"
        );
        Ok(ranked.into_iter().map(|p| p.id).collect())
    }

    /// [`Self::search`] restricted to places within `radius_miles` of the
    /// given point. Relevance order is kept; distance only filters.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Validation`] for a blank query, bad coordinates, or a
    ///   radius outside `[0.1, 400]` miles.
    /// - [`SearchError::Catalog`] if the catalog read fails.
    pub async fn search_near(
        &self,
        query: &str,
        latitude: f64,
        longitude: f64,
        radius_miles: f64,
    ) -> Result<Vec<String>, SearchError> {
        let tokens = normalize_search_query(query)?;
        let center = GeoPoint::new(latitude, longitude)?;
        let radius = parse_search_radius(radius_miles)?;

        let ranked = self.ranked(&tokens).await?;
        let ids: Vec<String> = ranked
            .into_iter()
            .filter_map(|place| {
                let distance = distance_from(center, &place)?;
                (distance <= radius.miles()).then_some(place.id)
            })
            .collect();

        tracing::info!(
            query,
            radius = %radius,
            matches = ids.len(),
            "catalog near search complete"
        );
        Ok(ids)
    }

    /// Ids of every catalog place within `radius_miles`, ignoring text, sorted
    /// by this searcher's [`DistanceOrder`].
    ///
    /// # Errors
    ///
    /// - [`SearchError::Validation`] for bad coordinates or radius.
    /// - [`SearchError::Catalog`] if the catalog read fails.
    pub async fn find_all_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius_miles: f64,
    ) -> Result<Vec<String>, SearchError> {
        let center = GeoPoint::new(latitude, longitude)?;
        let radius = parse_search_radius(radius_miles)?;

        let places = self.catalog.fetch_places().await?;
        let mut nearby: Vec<(f64, String)> = places
            .into_iter()
            .filter_map(|place| {
                let distance = distance_from(center, &place)?;
                (distance <= radius.miles()).then_some((distance, place.id))
            })
            .collect();

        match self.near_order {
            DistanceOrder::FarthestFirst => nearby.sort_by(|a, b| b.0.total_cmp(&a.0)),
            DistanceOrder::NearestFirst => nearby.sort_by(|a, b| a.0.total_cmp(&b.0)),
        }

        tracing::info!(
            radius = %radius,
            matches = nearby.len(),
            order = ?self.near_order,
            "find all near complete"
        );
        Ok(nearby.into_iter().map(|(_, id)| id).collect())
    }

    async fn ranked(&self, tokens: &[String]) -> Result<Vec<CatalogPlace>, SearchError> {
        let places = self.catalog.fetch_places().await?;
        let mut scored: Vec<(u32, CatalogPlace)> = places
            .into_iter()
            .map(|place| (compute_search_match_score(tokens, &place), place))
            .filter(|(score, _)| *score > 0)
            .collect();
        // sort_by is stable: ties stay in catalog read order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(scored.into_iter().map(|(_, place)| place).collect())
    }
}

fn distance_from(center: GeoPoint, place: &CatalogPlace) -> Option<f64> {
    match place.point() {
        Ok(point) => Some(center.distance_miles(&point)),
        Err(e) => {
            tracing::warn!(
                place_id = %place.id,
                error = %e,
                "skipping place with invalid coordinates"
            );
            None
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
