//! Coordinate validation, great-circle distance, and search-area boxes.
//!
//! Nothing here repairs bad input. Latitude outside `[-90, 90]` is an error;
//! longitude is wrapped into `(-180, 180]` because any finite longitude names
//! a real meridian.

use serde::Serialize;

use crate::ValidationError;

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

const MILES_PER_LAT_DEGREE: f64 = 69.0;
const MILES_PER_LNG_DEGREE_AT_EQUATOR: f64 = 69.17;

pub const MIN_SEARCH_RADIUS_MILES: f64 = 0.1;
pub const MAX_SEARCH_RADIUS_MILES: f64 = 400.0;

/// A validated coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Validates `latitude` and normalizes `longitude`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidLatitude`] or
    /// [`ValidationError::InvalidLongitude`].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            latitude: parse_latitude(latitude)?,
            longitude: normalize_longitude(longitude)?,
        })
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in miles.
    #[must_use]
    pub fn distance_miles(&self, other: &GeoPoint) -> f64 {
        great_circle_miles(self, other)
    }
}

/// Search radius in miles, range-checked and rounded to 4 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct SearchRadius(f64);

impl SearchRadius {
    #[must_use]
    pub fn miles(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} mi", self.0)
    }
}

/// # Errors
///
/// Returns [`ValidationError::InvalidLatitude`] for NaN or values outside `[-90, 90]`.
pub fn parse_latitude(value: f64) -> Result<f64, ValidationError> {
    if value.is_nan() || !(-90.0..=90.0).contains(&value) {
        return Err(ValidationError::InvalidLatitude(value));
    }
    Ok(value)
}

/// Wraps a longitude into `(-180, 180]`.
///
/// The magnitude is reduced modulo 360 into `[0, 180]` and the original sign
/// reapplied, so `181` becomes `-179` and `-181` becomes `179`. A result of
/// `-180` is reported as `180`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidLongitude`] for NaN or ±infinity.
pub fn normalize_longitude(value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidLongitude(value));
    }

    let mut magnitude = value.abs() % 360.0;
    if magnitude > 180.0 {
        magnitude -= 360.0;
    }

    if value < 0.0 && magnitude >= 180.0 {
        return Ok(180.0);
    }
    Ok(if value < 0.0 { -magnitude } else { magnitude })
}

/// Validates and rounds a search radius.
///
/// The range check runs on the raw value, so `400.00001` is rejected even
/// though it would round to `400`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidRadius`] for non-finite values or values
/// outside `[0.1, 400]`.
pub fn parse_search_radius(miles: f64) -> Result<SearchRadius, ValidationError> {
    if !miles.is_finite() || !(MIN_SEARCH_RADIUS_MILES..=MAX_SEARCH_RADIUS_MILES).contains(&miles)
    {
        return Err(ValidationError::InvalidRadius(miles));
    }
    Ok(SearchRadius((miles * 10_000.0).round() / 10_000.0))
}

/// Haversine distance in miles between two raw coordinate pairs.
///
/// All four inputs are validated (longitudes normalized) first.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidLatitude`] or
/// [`ValidationError::InvalidLongitude`] for any bad input.
pub fn haversine_distance_miles(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
) -> Result<f64, ValidationError> {
    let a = GeoPoint::new(lat1, lon1)?;
    let b = GeoPoint::new(lat2, lon2)?;
    Ok(great_circle_miles(&a, &b))
}

/// Public name for [`haversine_distance_miles`].
///
/// # Errors
///
/// See [`haversine_distance_miles`].
pub fn distance_between_points_miles(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
) -> Result<f64, ValidationError> {
    haversine_distance_miles(lat1, lon1, lat2, lon2)
}

fn great_circle_miles(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = haversin(d_lat) + lat1.cos() * lat2.cos() * haversin(d_lon);
    // Rounding can push h a hair outside [0, 1] for antipodal points.
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_MILES * h.sqrt().atan2((1.0 - h).sqrt())
}

fn haversin(theta: f64) -> f64 {
    let s = (theta / 2.0).sin();
    s * s
}

/// One corner of a [`BoundingBox`]. Not normalized; may fall outside the
/// valid coordinate range near the poles or the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxCorner {
    pub latitude: f64,
    pub longitude: f64,
}

/// Advisory search rectangle. `first` sits north of the center, `second` south.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub first: BoxCorner,
    pub second: BoxCorner,
}

/// Pads a radius to absorb haversine error and anchor-point drift.
///
/// | radius (mi) | padding |
/// |-------------|---------|
/// | > 200       | +2      |
/// | > 100       | +1      |
/// | > 50        | +0.5    |
/// | > 25        | +0.25   |
/// | > 10        | +0.1    |
/// | ≤ 10        | +0.02   |
#[must_use]
pub fn padded_radius_miles(radius: SearchRadius) -> f64 {
    let miles = radius.miles();
    let padding = if miles > 200.0 {
        2.0
    } else if miles > 100.0 {
        1.0
    } else if miles > 50.0 {
        0.5
    } else if miles > 25.0 {
        0.25
    } else if miles > 10.0 {
        0.1
    } else {
        0.02
    };
    miles + padding
}

/// Computes the advisory viewbox around `center`.
///
/// The padded radius is halved before conversion to degrees. Latitude uses a
/// flat 69 mi/deg; longitude shrinks with `cos(latitude)`.
#[must_use]
pub fn compute_bounding_box(center: GeoPoint, radius: SearchRadius) -> BoundingBox {
    let half = padded_radius_miles(radius) / 2.0;

    let lat_offset = half / MILES_PER_LAT_DEGREE;
    let miles_per_lng_degree =
        center.latitude.to_radians().cos() * MILES_PER_LNG_DEGREE_AT_EQUATOR;
    let lng_offset = half / miles_per_lng_degree;

    let (first_lng, second_lng) = hemisphere_longitude_offsets(center.longitude, lng_offset);

    BoundingBox {
        first: BoxCorner {
            latitude: center.latitude + lat_offset,
            longitude: first_lng,
        },
        second: BoxCorner {
            latitude: center.latitude - lat_offset,
            longitude: second_lng,
        },
    }
}

/// Applies the longitude offset to each corner, signed by the center's hemisphere.
///
/// Western centers move the first corner further west; eastern centers move
/// it further east. This keeps boxes compact over the continental US. It is a
/// heuristic: it does not wrap across the antimeridian and degenerates as
/// `cos(latitude)` approaches zero at the poles.
fn hemisphere_longitude_offsets(center_lng: f64, offset: f64) -> (f64, f64) {
    if center_lng < 0.0 {
        (center_lng - offset, center_lng + offset)
    } else {
        (center_lng + offset, center_lng - offset)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    const NYC: (f64, f64) = (40.712_8, -74.006_0);
    const LA: (f64, f64) = (34.052_2, -118.243_7);

    fn radius(miles: f64) -> SearchRadius {
        parse_search_radius(miles).unwrap()
    }

    #[test]
    fn latitude_outside_range_is_rejected() {
        assert_eq!(parse_latitude(90.0).unwrap(), 90.0);
        assert_eq!(parse_latitude(-90.0).unwrap(), -90.0);
        assert!(matches!(
            parse_latitude(90.000_1),
            Err(ValidationError::InvalidLatitude(_))
        ));
        assert!(parse_latitude(f64::NAN).is_err());
    }

    #[test]
    fn longitude_wraps_into_canonical_range() {
        assert_eq!(normalize_longitude(181.0).unwrap(), -179.0);
        assert_eq!(normalize_longitude(-181.0).unwrap(), 179.0);
        assert_eq!(normalize_longitude(540.0).unwrap(), 180.0);
        assert_eq!(normalize_longitude(-180.0).unwrap(), 180.0);
        assert_eq!(normalize_longitude(720.5).unwrap(), 0.5);
    }

    #[test]
    fn longitude_in_range_is_unchanged() {
        for v in [-179.9, -74.006, 0.0, 12.5, 180.0] {
            assert_eq!(normalize_longitude(v).unwrap(), v);
        }
    }

    #[test]
    fn longitude_rejects_non_finite() {
        assert!(matches!(
            normalize_longitude(f64::NAN),
            Err(ValidationError::InvalidLongitude(_))
        ));
        assert!(normalize_longitude(f64::INFINITY).is_err());
        assert!(normalize_longitude(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn haversine_new_york_to_los_angeles() {
        let d = haversine_distance_miles(NYC.0, NYC.1, LA.0, LA.1).unwrap();
        assert!((d - 2445.0).abs() < 24.45, "got {d}");
    }

    #[test]
    fn haversine_is_symmetric_and_zero_for_identical_points() {
        let ab = haversine_distance_miles(NYC.0, NYC.1, LA.0, LA.1).unwrap();
        let ba = haversine_distance_miles(LA.0, LA.1, NYC.0, NYC.1).unwrap();
        assert!((ab - ba).abs() < 1e-9);
        assert_eq!(
            haversine_distance_miles(NYC.0, NYC.1, NYC.0, NYC.1).unwrap(),
            0.0
        );
    }

    #[test]
    fn haversine_validates_inputs() {
        assert!(haversine_distance_miles(91.0, 0.0, 0.0, 0.0).is_err());
        assert!(haversine_distance_miles(0.0, f64::NAN, 0.0, 0.0).is_err());
        // Wrapped longitudes name the same meridian.
        let d = haversine_distance_miles(10.0, 181.0, 10.0, -179.0).unwrap();
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn search_radius_bounds_and_rounding() {
        assert!(matches!(
            parse_search_radius(0.05),
            Err(ValidationError::InvalidRadius(_))
        ));
        assert_eq!(parse_search_radius(0.1).unwrap().miles(), 0.1);
        assert!(parse_search_radius(400.000_01).is_err());
        assert_eq!(parse_search_radius(400.0).unwrap().miles(), 400.0);
        assert_eq!(parse_search_radius(12.345_67).unwrap().miles(), 12.345_7);
        assert!(parse_search_radius(f64::NAN).is_err());
    }

    #[test]
    fn padding_schedule_matches_magnitude() {
        assert_eq!(padded_radius_miles(radius(250.0)), 252.0);
        assert_eq!(padded_radius_miles(radius(200.0)), 201.0);
        assert_eq!(padded_radius_miles(radius(75.0)), 75.5);
        assert_eq!(padded_radius_miles(radius(30.0)), 30.25);
        assert!((padded_radius_miles(radius(15.0)) - 15.1).abs() < 1e-9);
        assert!((padded_radius_miles(radius(10.0)) - 10.02).abs() < 1e-9);
    }

    #[test]
    fn bounding_box_western_hemisphere() {
        let center = GeoPoint::new(NYC.0, NYC.1).unwrap();
        let bbox = compute_bounding_box(center, radius(10.0));

        let expected_lat_offset = 10.02 / 2.0 / 69.0;
        assert!((bbox.first.latitude - (NYC.0 + expected_lat_offset)).abs() < 1e-9);
        assert!((bbox.second.latitude - (NYC.0 - expected_lat_offset)).abs() < 1e-9);
        // First corner moves west for a western center.
        assert!(bbox.first.longitude < NYC.1);
        assert!(bbox.second.longitude > NYC.1);
        let lng_span = bbox.second.longitude - bbox.first.longitude;
        assert!(lng_span > 2.0 * expected_lat_offset, "longitude degrees are shorter");
    }

    #[test]
    fn bounding_box_eastern_hemisphere_flips_sign() {
        let center = GeoPoint::new(48.856_6, 2.352_2).unwrap();
        let bbox = compute_bounding_box(center, radius(50.0));
        assert!(bbox.first.longitude > 2.352_2);
        assert!(bbox.second.longitude < 2.352_2);
    }
}
