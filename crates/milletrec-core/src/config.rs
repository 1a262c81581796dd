use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional_path = |var: &str| -> Option<PathBuf> { lookup(var).ok().map(PathBuf::from) };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let env = parse_environment(&or_default("MILLETREC_ENV", "development"));
    let bind_addr = parse_addr("MILLETREC_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("MILLETREC_LOG_LEVEL", "info");

    let reviews_path = PathBuf::from(or_default("MILLETREC_REVIEWS_PATH", "./data/reviews.jsonl"));
    let summary_path = optional_path("MILLETREC_SUMMARY_PATH");
    let concerns_path = optional_path("MILLETREC_CONCERNS_PATH");
    let rules_path = optional_path("MILLETREC_RULES_PATH");
    let request_log_path = PathBuf::from(or_default(
        "MILLETREC_LOG_PATH",
        "./data/recommendation_log.jsonl",
    ));

    let default_top_k = parse_usize("MILLETREC_TOP_K", "3")?;
    let top_keywords = parse_usize("MILLETREC_TOP_KEYWORDS", "10")?;

    if default_top_k == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MILLETREC_TOP_K".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        reviews_path,
        summary_path,
        concerns_path,
        rules_path,
        request_log_path,
        default_top_k,
        top_keywords,
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
