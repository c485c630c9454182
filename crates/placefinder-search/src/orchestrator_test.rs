use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use placefinder_core::{PlaceLocation, ValidationError};

use super::*;
use crate::catalog::{CatalogError, StaticCatalog};

const CENTER_LAT: f64 = 40.0;
const CENTER_LON: f64 = -74.0;
/// Miles per degree of latitude at the haversine earth radius.
const MILES_PER_LAT_DEGREE: f64 = 69.09;

fn place(
    id: &str,
    name: &str,
    description: Option<&str>,
    latitude: f64,
    longitude: f64,
) -> CatalogPlace {
    CatalogPlace {
        id: id.to_string(),
        name: Some(name.to_string()),
        description: description.map(str::to_string),
        location: PlaceLocation {
            address: None,
            latitude,
            longitude,
        },
    }
}

/// A place due north of the test center at roughly `miles`.
fn place_at(id: &str, name: &str, miles: f64) -> CatalogPlace {
    place(
        id,
        name,
        None,
        CENTER_LAT + miles / MILES_PER_LAT_DEGREE,
        CENTER_LON,
    )
}

fn searcher(places: Vec<CatalogPlace>) -> PlaceSearch<StaticCatalog> {
    PlaceSearch::new(StaticCatalog::new(places))
}

/// Counts reads and can be told to fail.
#[derive(Default)]
struct CountingCatalog {
    reads: AtomicUsize,
    fail: bool,
}

impl PlaceCatalog for CountingCatalog {
    fn fetch_places(
        &self,
    ) -> impl Future<Output = Result<Vec<CatalogPlace>, CatalogError>> + Send {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let fail = self.fail;
        async move {
            if fail {
                Err(CatalogError::Unavailable("database offline".to_string()))
            } else {
                Ok(vec![place_at("a", "Liberty Park", 1.0)])
            }
        }
    }
}

#[tokio::test]
async fn search_orders_by_descending_score() {
    let search = searcher(vec![
        place("low", "Park Diner", None, 40.7, -74.0),
        place("none", "Hardware Store", None, 40.7, -74.0),
        place("high", "Liberty Park", Some("Accessible park in NJ"), 40.7, -74.0),
    ]);

    let ids = search.search("nj park").await.unwrap();
    assert_eq!(ids, vec!["high", "low"]);
}

#[tokio::test]
async fn search_ties_keep_catalog_order() {
    let search = searcher(vec![
        place("first", "Pizza One", None, 40.7, -74.0),
        place("second", "Pizza Two", None, 40.7, -74.0),
        place("third", "Pizza Three", None, 40.7, -74.0),
    ]);

    let ids = search.search("pizza").await.unwrap();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn search_without_matches_is_empty() {
    let search = searcher(vec![
        place("a", "Liberty Park", None, 40.7, -74.0),
        place("b", "Pizza Town", None, 40.7, -74.0),
    ]);
    assert!(search.search("zzzznomatch").await.unwrap().is_empty());
}

#[tokio::test]
async fn search_rejects_blank_query_without_reading_catalog() {
    let catalog = CountingCatalog::default();
    let search = PlaceSearch::new(catalog);

    let err = search.search("  ").await.unwrap_err();
    assert!(matches!(
        err,
        SearchError::Validation(ValidationError::InvalidQuery(_))
    ));
    assert_eq!(search.catalog().reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn catalog_failure_surfaces_as_catalog_error() {
    let search = PlaceSearch::new(CountingCatalog {
        fail: true,
        ..CountingCatalog::default()
    });
    let err = search.search("park").await.unwrap_err();
    assert!(matches!(err, SearchError::Catalog(_)));
}

#[tokio::test]
async fn search_near_filters_by_distance_and_keeps_relevance_order() {
    let mut best = place_at("best-far", "Pizza Pizza", 20.0);
    best.description = Some("pizza by the slice".to_string());
    let search = searcher(vec![
        place_at("near-first", "Corner Pizza", 2.0),
        best,
        place_at("near-second", "Pizza Palace", 4.0),
    ]);
    let ids = search.search("pizza").await.unwrap();
    assert_eq!(ids, vec!["best-far", "near-first", "near-second"]);

    let ids = search
        .search_near("pizza", CENTER_LAT, CENTER_LON, 10.0)
        .await
        .unwrap();
    assert_eq!(ids, vec!["near-first", "near-second"]);
}

#[tokio::test]
async fn search_near_validates_before_reading_catalog() {
    let search = PlaceSearch::new(CountingCatalog::default());

    for (lat, lon, radius) in [
        (91.0, CENTER_LON, 5.0),
        (CENTER_LAT, f64::NAN, 5.0),
        (CENTER_LAT, CENTER_LON, 0.05),
        (CENTER_LAT, CENTER_LON, 400.5),
    ] {
        let err = search
            .search_near("park", lat, lon, radius)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Validation(_)));
    }
    assert_eq!(search.catalog().reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn find_all_near_defaults_to_farthest_first() {
    let search = searcher(vec![
        place_at("one", "A", 1.0),
        place_at("five", "B", 5.0),
        place_at("three", "C", 3.0),
        place_at("far", "D", 50.0),
    ]);

    let ids = search
        .find_all_near(CENTER_LAT, CENTER_LON, 10.0)
        .await
        .unwrap();
    assert_eq!(ids, vec!["five", "three", "one"]);
}

#[tokio::test]
async fn find_all_near_can_sort_nearest_first() {
    let search = searcher(vec![
        place_at("one", "A", 1.0),
        place_at("five", "B", 5.0),
        place_at("three", "C", 3.0),
    ])
    .with_near_order(DistanceOrder::NearestFirst);

    let ids = search
        .find_all_near(CENTER_LAT, CENTER_LON, 10.0)
        .await
        .unwrap();
    assert_eq!(ids, vec!["one", "three", "five"]);
}

#[tokio::test]
async fn find_all_near_skips_places_with_invalid_coordinates() {
    let search = searcher(vec![
        place_at("ok", "A", 1.0),
        place("broken", "B", None, 123.0, CENTER_LON),
    ]);

    let ids = search
        .find_all_near(CENTER_LAT, CENTER_LON, 10.0)
        .await
        .unwrap();
    assert_eq!(ids, vec!["ok"]);
}

#[test]
fn default_near_order_is_farthest_first() {
    assert_eq!(FIND_ALL_NEAR_ORDER, DistanceOrder::FarthestFirst);
}
