//! Geocoding command handlers backed by the Nominatim gateway.

use placefinder_core::{distance_between_points_miles, AppConfig};
use placefinder_nominatim::{CancelToken, NominatimClient, NominatimError};

use crate::{print_json, AreaArgs};

pub(crate) fn build_client(
    config: &AppConfig,
    cancel: CancelToken,
) -> anyhow::Result<NominatimClient> {
    let client = NominatimClient::from_app_config(config)?;
    tracing::debug!(?client, "Nominatim client ready");
    Ok(client.with_cancellation(cancel))
}

pub(crate) async fn run_lookup(
    client: &NominatimClient,
    osm_type: &str,
    osm_id: &str,
) -> anyhow::Result<()> {
    let place = client
        .lookup(osm_type, osm_id)
        .await
        .map_err(user_facing)?;
    print_json(&place)
}

pub(crate) async fn run_geocode(client: &NominatimClient, query: &str) -> anyhow::Result<()> {
    let places = client.search(query).await.map_err(user_facing)?;
    print_json(&places)
}

pub(crate) async fn run_geocode_near(
    client: &NominatimClient,
    query: &str,
    area: AreaArgs,
) -> anyhow::Result<()> {
    let places = client
        .search_within(query, area.lat, area.lon, area.radius)
        .await
        .map_err(user_facing)?;
    print_json(&places)
}

pub(crate) fn run_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> anyhow::Result<()> {
    let miles = distance_between_points_miles(lat1, lon1, lat2, lon2)?;
    print_json(&serde_json::json!({ "miles": miles }))
}

/// Collapses provider failures into one generic message; the detail goes to
/// the log. Validation and other errors pass through unchanged.
pub(crate) fn user_facing(err: NominatimError) -> anyhow::Error {
    if err.is_gateway() {
        tracing::error!(error = %err, "geocoding gateway failure");
        anyhow::anyhow!("search currently unavailable")
    } else {
        err.into()
    }
}
