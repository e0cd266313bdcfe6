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
    pub catalog_api_url: String,
    /// Telemetry endpoint; `None` disables view/feature-click tracking.
    pub telemetry_url: Option<String>,
    pub stores_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub page_size: u32,
    pub phone_compare_limit: usize,
    /// Compare cap for laptops and appliances; `None` is unbounded.
    pub compare_limit: Option<usize>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("catalog_api_url", &self.catalog_api_url)
            .field(
                "telemetry_url",
                &self.telemetry_url.as_ref().map(|_| "[configured]"),
            )
            .field("stores_path", &self.stores_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("page_size", &self.page_size)
            .field("phone_compare_limit", &self.phone_compare_limit)
            .field("compare_limit", &self.compare_limit)
            .finish()
    }
}
