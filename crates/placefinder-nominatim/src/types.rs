//! Nominatim response types.
//!
//! Raw payload shapes (`jsonv2` format) are deserialized leniently; the
//! normalized [`NominatimPlace`] is what leaves the crate.

use std::collections::BTreeMap;

use placefinder_core::{GeoPoint, OsmReference, OsmType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Nominatim sends coordinates as strings in `jsonv2`; accept numbers too.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Text(String),
    Number(f64),
}

impl Coordinate {
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Coordinate::Text(s) => s.trim().parse().ok(),
            Coordinate::Number(n) => Some(*n),
        }
    }
}

/// One entry of a `/search` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub place_id: u64,
    #[serde(default)]
    pub osm_type: Option<String>,
    #[serde(default)]
    pub osm_id: Option<Value>,
    pub lat: Coordinate,
    pub lon: Coordinate,
}

impl SearchHit {
    /// Normalized `(type, id)` pair, if the hit carries a valid one.
    #[must_use]
    pub fn reference(&self) -> Option<OsmReference> {
        let osm_type = placefinder_core::parse_osm_type(self.osm_type.as_deref()?).ok()?;
        let osm_id = placefinder_core::parse_osm_id(self.osm_id.as_ref()?).ok()?;
        Some(OsmReference { osm_type, osm_id })
    }

    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.lat.value()?, self.lon.value()?).ok()
    }
}

/// One entry of a `/lookup` response with name, address, and extra-tag details.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupRecord {
    pub osm_type: String,
    pub osm_id: Value,
    pub lat: Coordinate,
    pub lon: Coordinate,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, alias = "class")]
    pub category: Option<String>,
    #[serde(default, rename = "type")]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub addresstype: Option<String>,
    #[serde(default)]
    pub address: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub extratags: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub namedetails: Option<BTreeMap<String, String>>,
}

/// A place resolved through `/lookup`. Constructed only by this crate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NominatimPlace {
    pub(crate) osm_type: OsmType,
    pub(crate) osm_id: String,
    pub(crate) point: GeoPoint,
    pub(crate) name: Option<String>,
    pub(crate) display_name: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) subcategory: Option<String>,
    pub(crate) address_tags: BTreeMap<String, String>,
    pub(crate) address_type: Option<String>,
    pub(crate) extra_tags: BTreeMap<String, String>,
    pub(crate) name_details: BTreeMap<String, String>,
}

impl NominatimPlace {
    #[must_use]
    pub fn osm_type(&self) -> OsmType {
        self.osm_type
    }

    #[must_use]
    pub fn osm_id(&self) -> &str {
        &self.osm_id
    }

    #[must_use]
    pub fn reference(&self) -> OsmReference {
        OsmReference {
            osm_type: self.osm_type,
            osm_id: self.osm_id.clone(),
        }
    }

    #[must_use]
    pub fn point(&self) -> GeoPoint {
        self.point
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.point.latitude()
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.point.longitude()
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// OSM class, e.g. `amenity`.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// OSM type tag within the class, e.g. `restaurant`.
    #[must_use]
    pub fn subcategory(&self) -> Option<&str> {
        self.subcategory.as_deref()
    }

    #[must_use]
    pub fn address_tags(&self) -> &BTreeMap<String, String> {
        &self.address_tags
    }

    #[must_use]
    pub fn address_type(&self) -> Option<&str> {
        self.address_type.as_deref()
    }

    #[must_use]
    pub fn extra_tags(&self) -> &BTreeMap<String, String> {
        &self.extra_tags
    }

    #[must_use]
    pub fn name_details(&self) -> &BTreeMap<String, String> {
        &self.name_details
    }
}
