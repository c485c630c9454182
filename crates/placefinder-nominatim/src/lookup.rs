//! Batched `/lookup` requests.

use std::collections::HashMap;

use percent_encoding::utf8_percent_encode;
use placefinder_core::OsmReference;

use crate::client::{NominatimClient, COMPONENT};
use crate::error::NominatimError;
use crate::types::{LookupRecord, NominatimPlace};

/// Nominatim rejects lookups naming more than 50 objects.
pub const LOOKUP_BATCH_SIZE: usize = 50;

const LOOKUP_ENDPOINT: &str = "lookup";

impl NominatimClient {
    /// Resolves a single OSM object.
    ///
    /// # Errors
    ///
    /// - [`NominatimError::Validation`] if `osm_type` or `osm_id` is invalid.
    /// - [`NominatimError::UnexpectedResultCount`] unless exactly one place
    ///   comes back.
    /// - Any gateway error from [`Self::lookup_many`].
    pub async fn lookup(
        &self,
        osm_type: &str,
        osm_id: &str,
    ) -> Result<NominatimPlace, NominatimError> {
        let reference = OsmReference::parse(osm_type, osm_id)?;
        let mut places = self.lookup_many(std::slice::from_ref(&reference)).await?;

        let count = places.len();
        match places.pop() {
            Some(place) if count == 1 => Ok(place),
            _ => Err(NominatimError::UnexpectedResultCount {
                context: format!("lookup({reference})"),
                expected: 1,
                actual: count,
            }),
        }
    }

    /// Resolves many OSM objects, 50 per request.
    ///
    /// Returns places in the order of `references`: chunk by chunk, and within
    /// each chunk in request order regardless of how Nominatim orders its
    /// response. Objects Nominatim does not know are simply absent. Records
    /// that fail to normalize are skipped with a warning.
    ///
    /// An empty slice returns immediately without touching the network.
    ///
    /// # Errors
    ///
    /// - [`NominatimError::EmptyBatch`] if a chunk renders to no ids.
    /// - [`NominatimError::Deserialize`] if a response is not a JSON array.
    /// - Any gateway error from the underlying request.
    pub async fn lookup_many(
        &self,
        references: &[OsmReference],
    ) -> Result<Vec<NominatimPlace>, NominatimError> {
        if references.is_empty() {
            return Ok(Vec::new());
        }

        let mut places = Vec::with_capacity(references.len());

        for (chunk_index, chunk) in references.chunks(LOOKUP_BATCH_SIZE).enumerate() {
            let osm_ids = encode_osm_ids(chunk);
            if osm_ids.is_empty() {
                return Err(NominatimError::EmptyBatch { chunk_index });
            }

            let mut url = self.build_url(
                LOOKUP_ENDPOINT,
                &[
                    ("namedetails", "1"),
                    ("addressdetails", "1"),
                    ("extratags", "1"),
                ],
            );
            Self::append_encoded_param(&mut url, "osm_ids", &osm_ids);

            let body = self.request_json(&url, LOOKUP_ENDPOINT).await?;
            let records: Vec<serde_json::Value> =
                serde_json::from_value(body).map_err(|e| NominatimError::Deserialize {
                    context: format!("lookup chunk {chunk_index}"),
                    source: e,
                })?;

            let resolved = records
                .into_iter()
                .filter_map(|value| {
                    serde_json::from_value::<LookupRecord>(value)
                        .map_err(|e| e.to_string())
                        .and_then(|r| NominatimPlace::try_from(r).map_err(|e| e.to_string()))
                        .map_err(|e| {
                            tracing::warn!(chunk_index, error = %e, "skipping malformed lookup record");
                        })
                        .ok()
                })
                .collect();

            places.extend(order_like_request(chunk, resolved));
        }

        Ok(places)
    }
}

/// Renders `N123,W456,...` with each item percent-encoded and literal commas.
pub(crate) fn encode_osm_ids(chunk: &[OsmReference]) -> String {
    chunk
        .iter()
        .map(|r| utf8_percent_encode(&r.to_string(), COMPONENT).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Stable-sorts `places` into the order their references appear in `chunk`.
fn order_like_request(chunk: &[OsmReference], mut places: Vec<NominatimPlace>) -> Vec<NominatimPlace> {
    let mut position: HashMap<&OsmReference, usize> = HashMap::with_capacity(chunk.len());
    for (i, reference) in chunk.iter().enumerate() {
        position.entry(reference).or_insert(i);
    }
    places.sort_by_key(|p| {
        position
            .get(&p.reference())
            .copied()
            .unwrap_or(usize::MAX)
    });
    places
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_osm_ids_joins_with_literal_commas() {
        let chunk = vec![
            OsmReference::parse("node", "1").unwrap(),
            OsmReference::parse("way", "22").unwrap(),
            OsmReference::parse("R", "333").unwrap(),
        ];
        assert_eq!(encode_osm_ids(&chunk), "N1,W22,R333");
    }

    #[test]
    fn encode_osm_ids_escapes_unusual_ids() {
        let chunk = vec![OsmReference::parse("node", "1 2,3").unwrap()];
        assert_eq!(encode_osm_ids(&chunk), "N1%202%2C3");
    }

    #[test]
    fn encode_osm_ids_of_empty_chunk_is_empty() {
        assert!(encode_osm_ids(&[]).is_empty());
    }
}
