use std::io::Write;

use super::*;

fn place(id: &str, latitude: f64, longitude: f64) -> CatalogPlace {
    CatalogPlace {
        id: id.to_string(),
        name: Some("Liberty Park".to_string()),
        description: None,
        location: PlaceLocation {
            address: None,
            latitude,
            longitude,
        },
    }
}

#[test]
fn validate_accepts_unique_places() {
    let catalog = CatalogFile {
        places: vec![place("a", 40.7, -74.0), place("b", 40.8, -74.1)],
    };
    assert!(validate_catalog(&catalog).is_ok());
}

#[test]
fn validate_rejects_empty_id() {
    let catalog = CatalogFile {
        places: vec![place("  ", 40.7, -74.0)],
    };
    let err = validate_catalog(&catalog).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_duplicate_id() {
    let catalog = CatalogFile {
        places: vec![place("a", 40.7, -74.0), place("a", 40.8, -74.1)],
    };
    let err = validate_catalog(&catalog).unwrap_err();
    assert!(err.to_string().contains("duplicate place id"));
}

#[test]
fn validate_rejects_out_of_range_latitude() {
    let catalog = CatalogFile {
        places: vec![place("a", 95.0, -74.0)],
    };
    let err = validate_catalog(&catalog).unwrap_err();
    assert!(err.to_string().contains("bad coordinates"));
}

#[test]
fn load_catalog_parses_optional_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"places:
  - id: "p1"
    name: "Liberty Park"
    description: "Accessible park in NJ"
    location:
      latitude: 40.7
      longitude: -74.05
  - id: "p2"
    location:
      address: "1 Main St, Hoboken, NJ"
      latitude: 40.74
      longitude: -74.03
"#
    )
    .unwrap();

    let catalog = load_catalog(file.path()).unwrap();
    assert_eq!(catalog.places.len(), 2);
    assert_eq!(catalog.places[0].location.address, None);
    assert_eq!(catalog.places[1].name, None);
    assert_eq!(
        catalog.places[1].location.address.as_deref(),
        Some("1 Main St, Hoboken, NJ")
    );
}

#[test]
fn load_catalog_reports_missing_file() {
    let err = load_catalog(Path::new("/nonexistent/places.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::CatalogFileIo { .. }));
}
