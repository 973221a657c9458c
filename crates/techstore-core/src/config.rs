use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Origin used when `TECHSTORE_API_URL` is unset outside production.
pub const DEFAULT_API_URL: &str = "https://tech-server-4ma6.vercel.app";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("TECHSTORE_ENV", "development"))?;

    // Production must name its origin explicitly; every other environment
    // falls back to the public demo API.
    let raw_api_url = match lookup("TECHSTORE_API_URL") {
        Ok(v) if !v.trim().is_empty() => v,
        _ if env == Environment::Production => {
            return Err(ConfigError::MissingEnvVar("TECHSTORE_API_URL".to_string()));
        }
        _ => DEFAULT_API_URL.to_string(),
    };
    let api_url = parse_api_url(&raw_api_url)?;

    let bind_addr = or_default("TECHSTORE_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("TECHSTORE_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("TECHSTORE_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("TECHSTORE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("TECHSTORE_USER_AGENT", "techstore/0.1 (catalog-frontend)");

    let prerender = parse_bool(&or_default("TECHSTORE_PRERENDER", "true"))
        .ok_or_else(|| invalid("TECHSTORE_PRERENDER", "expected true or false".to_string()))?;

    let prerender_concurrency = or_default("TECHSTORE_PRERENDER_CONCURRENCY", "4")
        .parse::<usize>()
        .map_err(|e| invalid("TECHSTORE_PRERENDER_CONCURRENCY", e.to_string()))?;
    if prerender_concurrency == 0 {
        return Err(invalid(
            "TECHSTORE_PRERENDER_CONCURRENCY",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        api_url,
        env,
        bind_addr,
        log_level,
        request_timeout_secs,
        user_agent,
        prerender,
        prerender_concurrency,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TECHSTORE_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Validates the API origin. Only `http` and `https` bases are accepted.
fn parse_api_url(raw: &str) -> Result<reqwest::Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "TECHSTORE_API_URL".to_string(),
        reason,
    };

    let url = reqwest::Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "unsupported scheme \"{}\"; expected http or https",
            url.scheme()
        )));
    }
    Ok(url)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
