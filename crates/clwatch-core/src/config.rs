use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so it
/// can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    let env = parse_environment(&or_default("CLWATCH_ENV", "development"))?;
    let log_level = or_default("CLWATCH_LOG_LEVEL", "info");

    let state_path = PathBuf::from(or_default("CLWATCH_STATE_PATH", "./feed_state.json"));
    let database_url = or_default("CLWATCH_DATABASE_URL", "sqlite://clwatch.db");

    let feed_request_timeout_secs = parse_u64("CLWATCH_FEED_REQUEST_TIMEOUT_SECS", "30")?;
    let feed_user_agent = or_default("CLWATCH_FEED_USER_AGENT", "clwatch/0.1 (listing-watch)");

    let mail_api_url = or_default("CLWATCH_MAIL_API_URL", "https://api.brevo.com");
    let mail_api_key = lookup("CLWATCH_MAIL_API_KEY").ok();
    let sender_name = or_default("CLWATCH_SENDER_NAME", "clwatch");
    let sender_email = lookup("CLWATCH_SENDER_EMAIL").ok();
    let recipient_name = or_default("CLWATCH_RECIPIENT_NAME", "");
    let recipient_email = lookup("CLWATCH_RECIPIENT_EMAIL").ok();

    Ok(AppConfig {
        env,
        log_level,
        state_path,
        database_url,
        feed_request_timeout_secs,
        feed_user_agent,
        mail_api_url,
        mail_api_key,
        sender_name,
        sender_email,
        recipient_name,
        recipient_email,
    })
}

fn parse_environment(raw: &str) -> Result<Environment, ConfigError> {
    match raw {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CLWATCH_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
