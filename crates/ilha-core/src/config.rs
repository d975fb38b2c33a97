use crate::app_config::{AppConfig, Environment};
use crate::places::Lang;
use crate::ConfigError;

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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got '{other}'"),
            }),
        }
    };

    let api_base_url = require("ILHA_API_BASE_URL")?;
    if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "ILHA_API_BASE_URL".to_string(),
            reason: format!("'{api_base_url}' is not an http(s) URL"),
        });
    }
    let api_base_url = api_base_url.trim_end_matches('/').to_string();

    let env = parse_environment(&or_default("ILHA_ENV", "development"))?;
    let log_level = or_default("ILHA_LOG_LEVEL", "info");
    let cache_dir = PathBuf::from(or_default("ILHA_CACHE_DIR", "./.cache/ilha"));
    let request_timeout_secs = parse_u64("ILHA_REQUEST_TIMEOUT_SECS", "15")?;
    let user_agent = or_default("ILHA_USER_AGENT", "ilha/0.1 (visitor-guide)");
    let revalidate_cache = parse_bool("ILHA_REVALIDATE_CACHE", "true")?;
    let transfer_fallback_path = PathBuf::from(or_default(
        "ILHA_TRANSFER_FALLBACK_PATH",
        "./config/transfers.yaml",
    ));
    let island_label = or_default("ILHA_ISLAND_LABEL", "Maio");
    let lang_raw = or_default("ILHA_LANG", "pt");
    let lang = lang_raw
        .parse::<Lang>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "ILHA_LANG".to_string(),
            reason,
        })?;

    Ok(AppConfig {
        env,
        log_level,
        api_base_url,
        cache_dir,
        request_timeout_secs,
        user_agent,
        revalidate_cache,
        transfer_fallback_path,
        island_label,
        lang,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ILHA_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
