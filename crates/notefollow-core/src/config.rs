use crate::app_config::{AppConfig, Environment};
use crate::clock::TrackingZone;
use crate::ConfigError;

pub const DEFAULT_PROXY_URL: &str = "https://falling-mouse-736b.hasyamo.workers.dev/";
pub const DEFAULT_USER_AGENT: &str = "notefollow/0.1 (follower-tracking)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables take their defaults.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("NOTEFOLLOW_ENV", "development"))?;
    let bind_addr = parse_addr("NOTEFOLLOW_BIND_ADDR", "127.0.0.1:3000")?;
    let log_level = or_default("NOTEFOLLOW_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("NOTEFOLLOW_DATA_DIR", "./data"));

    let proxy_url = or_default("NOTEFOLLOW_PROXY_URL", DEFAULT_PROXY_URL);
    if proxy_url.trim().is_empty() {
        return Err(invalid("NOTEFOLLOW_PROXY_URL", "must not be empty".to_string()));
    }

    let request_timeout_secs = parse_u64("NOTEFOLLOW_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "NOTEFOLLOW_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let user_agent = or_default("NOTEFOLLOW_USER_AGENT", DEFAULT_USER_AGENT);

    let offset_hours = or_default("NOTEFOLLOW_UTC_OFFSET_HOURS", "9")
        .parse::<i32>()
        .map_err(|e| invalid("NOTEFOLLOW_UTC_OFFSET_HOURS", e.to_string()))?;
    let zone = TrackingZone::from_hours(offset_hours).ok_or_else(|| {
        invalid(
            "NOTEFOLLOW_UTC_OFFSET_HOURS",
            format!("{offset_hours} is outside -23..=23"),
        )
    })?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        data_dir,
        proxy_url,
        request_timeout_secs,
        user_agent,
        zone,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NOTEFOLLOW_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
