//! Free-text search, both unbounded and around a point.
//!
//! Nominatim returns at most 40 hits per `/search` call and treats the
//! viewbox as a hint rather than a filter, so one call rarely yields a useful
//! set of nearby places. [`NominatimClient::search_within`] pages through
//! results by excluding every `place_id` already seen.
//!
//! The viewbox stays advisory. The candidate filter is separate: a hit counts
//! only when its own coordinates lie within the padded radius of the center.
//! "No candidates yet" therefore means "nothing nearby yet", and that is the
//! condition that extends the loop from [`MIN_SEARCH_ROUNDS`] up to
//! [`MAX_SEARCH_ROUNDS`].

use std::collections::HashSet;

use percent_encoding::utf8_percent_encode;
use placefinder_core::{
    compute_bounding_box, padded_radius_miles, parse_search_radius, BoundingBox, GeoPoint,
    OsmReference, ValidationError,
};
use reqwest::Url;

use crate::client::{NominatimClient, COMPONENT};
use crate::error::NominatimError;
use crate::types::{NominatimPlace, SearchHit};

/// Provider maximum for `limit`.
pub const SEARCH_PAGE_SIZE: u32 = 40;
/// Rounds always performed by an area search.
pub const MIN_SEARCH_ROUNDS: usize = 2;
/// Upper bound on rounds while no nearby candidate has turned up.
pub const MAX_SEARCH_ROUNDS: usize = 4;

const SEARCH_ENDPOINT: &str = "search";

impl NominatimClient {
    /// Searches Nominatim for `query` and resolves every hit via lookup.
    ///
    /// Places come back in Nominatim's relevance order.
    ///
    /// # Errors
    ///
    /// - [`NominatimError::Validation`] for an empty query.
    /// - Any gateway error from the search or the lookups.
    pub async fn search(&self, query: &str) -> Result<Vec<NominatimPlace>, NominatimError> {
        let query = parse_query(query)?;
        let url = self.build_url(SEARCH_ENDPOINT, &[("q", query)]);
        let hits = self.fetch_hits(&url).await?;

        let mut seen = HashSet::new();
        let references: Vec<OsmReference> = hits
            .iter()
            .filter_map(SearchHit::reference)
            .filter(|r| seen.insert(r.clone()))
            .collect();

        tracing::info!(query, hits = hits.len(), "Nominatim search complete");
        self.lookup_many(&references).await
    }

    /// Searches for `query` near `(latitude, longitude)` within `radius_miles`.
    ///
    /// Runs at least [`MIN_SEARCH_ROUNDS`] rounds and, while no hit has landed
    /// inside the radius, up to [`MAX_SEARCH_ROUNDS`]. An empty page from the
    /// second round on means the provider is exhausted and ends the loop; an
    /// empty first page is tolerated. Candidates are resolved via lookup and
    /// returned nearest first.
    ///
    /// # Errors
    ///
    /// - [`NominatimError::Validation`] for an empty query, bad coordinates, or
    ///   a radius outside `[0.1, 400]` miles. Checked before any request.
    /// - [`NominatimError::Cancelled`] if the bound token fires.
    /// - Any gateway error from the searches or the lookups.
    pub async fn search_within(
        &self,
        query: &str,
        latitude: f64,
        longitude: f64,
        radius_miles: f64,
    ) -> Result<Vec<NominatimPlace>, NominatimError> {
        let query = parse_query(query)?;
        let center = GeoPoint::new(latitude, longitude)?;
        let radius = parse_search_radius(radius_miles)?;

        let viewbox = compute_bounding_box(center, radius);
        let reach_miles = padded_radius_miles(radius);
        let mut state = AreaSearchState::default();

        let mut round = 0;
        while round < MIN_SEARCH_ROUNDS
            || (state.candidates.is_empty() && round < MAX_SEARCH_ROUNDS)
        {
            if self.cancel.is_cancelled() {
                return Err(NominatimError::Cancelled);
            }
            round += 1;

            let url = self.area_search_url(query, center, &viewbox, &state.excluded);
            let hits = self.fetch_hits(&url).await?;
            tracing::debug!(round, hits = hits.len(), "area search round");

            if hits.is_empty() {
                if round >= MIN_SEARCH_ROUNDS {
                    break;
                }
                continue;
            }

            state.absorb(&hits, center, reach_miles);
        }

        tracing::info!(
            query,
            rounds = round,
            candidates = state.candidates.len(),
            radius = %radius,
            "Nominatim area search complete"
        );

        let mut places = self.lookup_many(&state.candidates).await?;
        places.sort_by(|a, b| {
            center
                .distance_miles(&a.point())
                .total_cmp(&center.distance_miles(&b.point()))
        });
        Ok(places)
    }

    async fn fetch_hits(&self, url: &Url) -> Result<Vec<SearchHit>, NominatimError> {
        let body = self.request_json(url, SEARCH_ENDPOINT).await?;
        serde_json::from_value(body).map_err(|e| NominatimError::Deserialize {
            context: "search results".to_owned(),
            source: e,
        })
    }

    fn area_search_url(
        &self,
        query: &str,
        center: GeoPoint,
        viewbox: &BoundingBox,
        excluded: &[u64],
    ) -> Url {
        let limit = SEARCH_PAGE_SIZE.to_string();
        let mut url = self.build_url(
            SEARCH_ENDPOINT,
            &[
                ("q", &query_with_center_hint(query, center)),
                ("limit", &limit),
                ("dedupe", "1"),
                ("countrycodes", "us"),
                ("accept-language", "en"),
            ],
        );

        Self::append_encoded_param(&mut url, "viewbox", &encode_viewbox(viewbox));
        if !excluded.is_empty() {
            let ids = excluded
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(",");
            Self::append_encoded_param(&mut url, "exclude_place_ids", &ids);
        }
        url
    }
}

#[derive(Debug, Default)]
struct AreaSearchState {
    candidates: Vec<OsmReference>,
    seen: HashSet<OsmReference>,
    excluded: Vec<u64>,
}

impl AreaSearchState {
    /// Excludes every hit from later rounds and keeps the new nearby ones.
    fn absorb(&mut self, hits: &[SearchHit], center: GeoPoint, reach_miles: f64) {
        for hit in hits {
            if !self.excluded.contains(&hit.place_id) {
                self.excluded.push(hit.place_id);
            }

            let Some(reference) = hit.reference() else {
                continue;
            };
            let nearby = hit
                .point()
                .is_some_and(|p| center.distance_miles(&p) <= reach_miles);
            if nearby && self.seen.insert(reference.clone()) {
                self.candidates.push(reference);
            }
        }
    }
}

fn parse_query(query: &str) -> Result<&str, ValidationError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidQuery(
            "search query cannot be empty".to_owned(),
        ));
    }
    Ok(trimmed)
}

/// Appends the center as `[lat,lon]`, which Nominatim reads as a near-point.
fn query_with_center_hint(query: &str, center: GeoPoint) -> String {
    format!("{query} [{},{}]", center.latitude(), center.longitude())
}

/// Renders the viewbox in provider order: `lon1,lat1,lon2,lat2`.
fn encode_viewbox(viewbox: &BoundingBox) -> String {
    [
        viewbox.first.longitude,
        viewbox.first.latitude,
        viewbox.second.longitude,
        viewbox.second.latitude,
    ]
    .iter()
    .map(|v| utf8_percent_encode(&v.to_string(), COMPONENT).to_string())
    .collect::<Vec<_>>()
    .join(",")
}
