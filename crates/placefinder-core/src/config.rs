use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("PLACEFINDER_ENV", "development"));
    let log_level = or_default("PLACEFINDER_LOG_LEVEL", "info");
    let catalog_path = PathBuf::from(or_default(
        "PLACEFINDER_CATALOG_PATH",
        "./config/places.yaml",
    ));

    let nominatim_base_url = or_default(
        "NOMINATIM_BASE_URL",
        "https://nominatim.openstreetmap.org/",
    );
    let nominatim_user_agent = or_default(
        "NOMINATIM_USER_AGENT",
        "placefinder/0.1 (place-search)",
    );
    let nominatim_email = lookup("NOMINATIM_EMAIL")
        .ok()
        .filter(|v| !v.trim().is_empty());
    let nominatim_request_delay_ms = parse_u64("NOMINATIM_REQUEST_DELAY_MS", "1250")?;
    let nominatim_timeout_secs = parse_u64("NOMINATIM_TIMEOUT_SECS", "30")?;
    let nominatim_max_retries = parse_u32("NOMINATIM_MAX_RETRIES", "0")?;
    let nominatim_retry_backoff_base_ms = parse_u64("NOMINATIM_RETRY_BACKOFF_BASE_MS", "1000")?;

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        nominatim_base_url,
        nominatim_user_agent,
        nominatim_email,
        nominatim_request_delay_ms,
        nominatim_timeout_secs,
        nominatim_max_retries,
        nominatim_retry_backoff_base_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
