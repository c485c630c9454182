use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["placefinder"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.catalog.is_none());
}

#[test]
fn parses_lookup_command() {
    let cli = Cli::try_parse_from([
        "placefinder",
        "lookup",
        "--osm-type",
        "way",
        "--osm-id",
        "42",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Lookup { osm_type, osm_id }) = cli.command else {
        panic!("expected lookup command");
    };
    assert_eq!(osm_type, "way");
    assert_eq!(osm_id, "42");
}

#[test]
fn parses_geocode_near_with_negative_longitude() {
    let cli = Cli::try_parse_from([
        "placefinder",
        "geocode-near",
        "pizza",
        "--lat",
        "40.7",
        "--lon",
        "-74.05",
        "--radius",
        "5",
    ])
    .expect("expected valid cli args");

    let Some(Commands::GeocodeNear { query, area }) = cli.command else {
        panic!("expected geocode-near command");
    };
    assert_eq!(query, "pizza");
    assert!((area.lat - 40.7).abs() < f64::EPSILON);
    assert!((area.lon + 74.05).abs() < f64::EPSILON);
    assert!((area.radius - 5.0).abs() < f64::EPSILON);
}

#[test]
fn radius_defaults_to_ten_miles() {
    let cli = Cli::try_parse_from(["placefinder", "near", "--lat", "40.7", "--lon", "-74.0"])
        .expect("expected valid cli args");

    let Some(Commands::Near {
        area,
        nearest_first,
    }) = cli.command
    else {
        panic!("expected near command");
    };
    assert!((area.radius - 10.0).abs() < f64::EPSILON);
    assert!(!nearest_first);
}

#[test]
fn parses_near_nearest_first_flag() {
    let cli = Cli::try_parse_from([
        "placefinder",
        "near",
        "--lat",
        "40.7",
        "--lon",
        "-74.0",
        "--nearest-first",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Near {
            nearest_first: true,
            ..
        })
    ));
}

#[test]
fn catalog_override_is_global() {
    let cli = Cli::try_parse_from([
        "placefinder",
        "search",
        "liberty park",
        "--catalog",
        "/tmp/places.yaml",
    ])
    .expect("expected valid cli args");

    assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/places.yaml")));
    assert!(matches!(
        cli.command,
        Some(Commands::Search { ref query }) if query == "liberty park"
    ));
}

#[test]
fn distance_requires_all_coordinates() {
    let result = Cli::try_parse_from(["placefinder", "distance", "--lat1", "40.7"]);
    assert!(result.is_err());
}

#[test]
fn gateway_errors_become_generic_message() {
    let err = geocode::user_facing(placefinder_nominatim::NominatimError::UnexpectedStatus {
        status: 503,
        endpoint: "search".to_string(),
    });
    assert_eq!(err.to_string(), "search currently unavailable");
}

#[test]
fn validation_errors_keep_their_message() {
    let err = geocode::user_facing(placefinder_nominatim::NominatimError::Validation(
        placefinder_core::ValidationError::InvalidRadius(500.0),
    ));
    assert_ne!(err.to_string(), "search currently unavailable");
}

#[test]
fn ansi_logs_only_in_development() {
    assert!(use_ansi_logs(&Environment::Development));
    assert!(!use_ansi_logs(&Environment::Test));
    assert!(!use_ansi_logs(&Environment::Production));
}
