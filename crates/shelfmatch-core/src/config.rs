use crate::app_config::{AppConfig, Environment};
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
/// Unlike [`load_app_config`], this does NOT load `.env` files. Use it in tests
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the real environment so tests can
/// drive this with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_http_url = |var: &str, raw: String| -> Result<String, ConfigError> {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(raw.trim_end_matches('/').to_string())
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected an http(s) URL, got \"{raw}\""),
            })
        }
    };

    let catalog_base_url = parse_http_url(
        "SHELFMATCH_CATALOG_URL",
        require("SHELFMATCH_CATALOG_URL")?,
    )?;
    let detail_base_url = match lookup("SHELFMATCH_DETAIL_URL") {
        Ok(raw) if !raw.trim().is_empty() => {
            parse_http_url("SHELFMATCH_DETAIL_URL", raw.trim().to_string())?
        }
        _ => catalog_base_url.clone(),
    };

    let env = parse_environment(&or_default("SHELFMATCH_ENV", "development"))?;
    let log_level = or_default("SHELFMATCH_LOG_LEVEL", "info");
    let proxy_url = lookup("SHELFMATCH_PROXY_URL")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let request_timeout_secs = parse_u64("SHELFMATCH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "SHELFMATCH_USER_AGENT",
        "shelfmatch/0.1 (listing-correlation)",
    );
    let max_retries = parse_u32("SHELFMATCH_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("SHELFMATCH_RETRY_BACKOFF_BASE_SECS", "5")?;
    let max_retry_after_secs = parse_u64("SHELFMATCH_MAX_RETRY_AFTER_SECS", "60")?;
    let default_max_results = parse_usize("SHELFMATCH_MAX_RESULTS", "5")?;

    if default_max_results == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHELFMATCH_MAX_RESULTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        catalog_base_url,
        detail_base_url,
        proxy_url,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
        max_retry_after_secs,
        default_max_results,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHELFMATCH_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
