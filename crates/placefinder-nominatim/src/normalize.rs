//! Conversion of raw `/lookup` records into [`NominatimPlace`].

use placefinder_core::{parse_osm_class, parse_osm_id, parse_osm_type, GeoPoint, ValidationError};

use crate::types::{LookupRecord, NominatimPlace};

impl TryFrom<LookupRecord> for NominatimPlace {
    type Error = ValidationError;

    fn try_from(record: LookupRecord) -> Result<Self, Self::Error> {
        let osm_type = parse_osm_type(&record.osm_type)?;
        let osm_id = parse_osm_id(&record.osm_id)?;

        let latitude = record
            .lat
            .value()
            .ok_or(ValidationError::InvalidLatitude(f64::NAN))?;
        let longitude = record
            .lon
            .value()
            .ok_or(ValidationError::InvalidLongitude(f64::NAN))?;
        let point = GeoPoint::new(latitude, longitude)?;

        // An empty class is as good as none.
        let category = record
            .category
            .as_deref()
            .and_then(|c| parse_osm_class(c).ok());

        Ok(NominatimPlace {
            osm_type,
            osm_id,
            point,
            name: non_empty(record.name),
            display_name: non_empty(record.display_name),
            category,
            subcategory: non_empty(record.subcategory),
            address_tags: record.address.unwrap_or_default(),
            address_type: non_empty(record.addresstype),
            extra_tags: record.extratags.unwrap_or_default(),
            name_details: record.namedetails.unwrap_or_default(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
