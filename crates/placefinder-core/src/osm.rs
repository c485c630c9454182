//! OpenStreetMap identifier normalization.
//!
//! Nominatim is inconsistent about how it spells identifiers across endpoints
//! (`"node"` vs `"N"`, numeric vs string ids). Everything that leaves this
//! module is canonical: single-letter types and string ids.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OsmType {
    Node,
    Way,
    Relation,
}

impl OsmType {
    /// Canonical single-letter code (`N`, `W`, `R`).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            OsmType::Node => "N",
            OsmType::Way => "W",
            OsmType::Relation => "R",
        }
    }
}

impl std::fmt::Display for OsmType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<String> for OsmType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_osm_type(&value)
    }
}

impl From<OsmType> for String {
    fn from(value: OsmType) -> Self {
        value.code().to_owned()
    }
}

/// Parses an OSM type from either its full name or its single-letter code.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidOsmType`] for anything other than
/// `node`/`way`/`relation`/`n`/`w`/`r`.
pub fn parse_osm_type(raw: &str) -> Result<OsmType, ValidationError> {
    match raw.trim().to_lowercase().as_str() {
        "n" | "node" => Ok(OsmType::Node),
        "w" | "way" => Ok(OsmType::Way),
        "r" | "relation" => Ok(OsmType::Relation),
        _ => Err(ValidationError::InvalidOsmType(raw.to_owned())),
    }
}

/// Parses an OSM id from a JSON value as returned by the provider or a caller.
///
/// Numbers are converted to their string form; strings are trimmed and must
/// be non-empty.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidOsmId`] for empty strings, `null`, and
/// any other JSON type.
pub fn parse_osm_id(raw: &Value) -> Result<String, ValidationError> {
    match raw {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => parse_osm_id_str(s),
        Value::Null => Err(ValidationError::InvalidOsmId("id is null".to_owned())),
        other => Err(ValidationError::InvalidOsmId(format!(
            "unsupported id type: {other}"
        ))),
    }
}

/// String-only variant of [`parse_osm_id`].
///
/// # Errors
///
/// Returns [`ValidationError::InvalidOsmId`] if `raw` is empty after trimming.
pub fn parse_osm_id_str(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidOsmId(
            "id cannot be an empty string".to_owned(),
        ));
    }
    Ok(trimmed.to_owned())
}

/// Parses an OSM class (`amenity`, `leisure`, ...), lower-cased.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidOsmClass`] if `raw` is empty after trimming.
pub fn parse_osm_class(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidOsmClass(
            "class cannot be an empty string".to_owned(),
        ));
    }
    Ok(trimmed.to_lowercase())
}

/// A normalized `(type, id)` pair identifying one OSM object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OsmReference {
    pub osm_type: OsmType,
    pub osm_id: String,
}

impl OsmReference {
    /// Builds a reference from raw caller input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidOsmType`] or
    /// [`ValidationError::InvalidOsmId`] when either half fails to parse.
    pub fn parse(osm_type: &str, osm_id: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            osm_type: parse_osm_type(osm_type)?,
            osm_id: parse_osm_id_str(osm_id)?,
        })
    }
}

/// Renders as the lookup key Nominatim expects, e.g. `N240109189`.
impl std::fmt::Display for OsmReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.osm_type.code(), self.osm_id)
    }
}
