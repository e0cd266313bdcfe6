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
/// Decoupled from the process environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("GADGETCMP_ENV", "development"))?;
    let log_level = or_default("GADGETCMP_LOG_LEVEL", "info");

    let catalog_api_url = or_default("GADGETCMP_CATALOG_API_URL", "http://localhost:5000/api");
    if !catalog_api_url.starts_with("http://") && !catalog_api_url.starts_with("https://") {
        return Err(invalid(
            "GADGETCMP_CATALOG_API_URL",
            format!("expected an http(s) URL, got '{catalog_api_url}'"),
        ));
    }
    let telemetry_url = optional("GADGETCMP_TELEMETRY_URL");
    let stores_path = PathBuf::from(or_default("GADGETCMP_STORES_PATH", "./config/stores.yaml"));

    let request_timeout_secs = parse_u64("GADGETCMP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("GADGETCMP_USER_AGENT", "gadgetcmp/0.1 (catalog-compare)");
    let max_retries = parse_u32("GADGETCMP_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("GADGETCMP_RETRY_BACKOFF_BASE_SECS", "2")?;

    let page_size = parse_u32("GADGETCMP_PAGE_SIZE", "100")?;
    if page_size == 0 {
        return Err(invalid("GADGETCMP_PAGE_SIZE", "must be at least 1".to_string()));
    }

    let phone_compare_limit = parse_usize("GADGETCMP_PHONE_COMPARE_LIMIT", "4")?;
    if phone_compare_limit == 0 {
        return Err(invalid(
            "GADGETCMP_PHONE_COMPARE_LIMIT",
            "must be at least 1".to_string(),
        ));
    }
    let compare_limit = match optional("GADGETCMP_COMPARE_LIMIT") {
        Some(raw) => Some(
            raw.parse::<usize>()
                .map_err(|e| invalid("GADGETCMP_COMPARE_LIMIT", e.to_string()))?,
        ),
        None => None,
    };

    Ok(AppConfig {
        env,
        log_level,
        catalog_api_url,
        telemetry_url,
        stores_path,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        page_size,
        phone_compare_limit,
        compare_limit,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GADGETCMP_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
