use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub catalog_path: PathBuf,
    pub nominatim_base_url: String,
    pub nominatim_user_agent: String,
    /// Contact address sent with each request, per the Nominatim usage policy.
    pub nominatim_email: Option<String>,
    /// Fixed pause before every outbound geocoding request.
    pub nominatim_request_delay_ms: u64,
    pub nominatim_timeout_secs: u64,
    /// Retries are opt-in; `0` keeps the gateway's fail-fast behaviour.
    pub nominatim_max_retries: u32,
    pub nominatim_retry_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("catalog_path", &self.catalog_path)
            .field("nominatim_base_url", &self.nominatim_base_url)
            .field("nominatim_user_agent", &self.nominatim_user_agent)
            .field(
                "nominatim_email",
                &self.nominatim_email.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "nominatim_request_delay_ms",
                &self.nominatim_request_delay_ms,
            )
            .field("nominatim_timeout_secs", &self.nominatim_timeout_secs)
            .field("nominatim_max_retries", &self.nominatim_max_retries)
            .field(
                "nominatim_retry_backoff_base_ms",
                &self.nominatim_retry_backoff_base_ms,
            )
            .finish()
    }
}
