use crate::app_config::{AppConfig, Environment, RelayOverride};
use crate::ConfigError;

/// Browser-like default so relays forward a request retailers treat as a normal visit.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
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
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a plain `HashMap`
/// lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let env = parse_environment(&or_default("UNITPRICE_ENV", "development"))?;
    let log_level = or_default("UNITPRICE_LOG_LEVEL", "info");

    let fetch_timeout_secs = parse_u64("UNITPRICE_FETCH_TIMEOUT_SECS", "20")?;
    if fetch_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "UNITPRICE_FETCH_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let user_agent = or_default("UNITPRICE_USER_AGENT", DEFAULT_USER_AGENT);
    let relays = match lookup("UNITPRICE_RELAYS") {
        Ok(raw) => parse_relays(&raw)?,
        Err(_) => Vec::new(),
    };

    Ok(AppConfig {
        env,
        log_level,
        fetch_timeout_secs,
        user_agent,
        relays,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "UNITPRICE_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Parse `UNITPRICE_RELAYS`: comma-separated `name=prefix` entries.
///
/// Blank entries are skipped. The prefix must start with `http://` or `https://`.
fn parse_relays(raw: &str) -> Result<Vec<RelayOverride>, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "UNITPRICE_RELAYS".to_string(),
        reason,
    };

    let mut relays = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let Some((name, prefix)) = entry.split_once('=') else {
            return Err(invalid(format!("entry \"{entry}\" is not name=prefix")));
        };
        let (name, prefix) = (name.trim(), prefix.trim());
        if name.is_empty() {
            return Err(invalid(format!("entry \"{entry}\" has an empty name")));
        }
        if !(prefix.starts_with("http://") || prefix.starts_with("https://")) {
            return Err(invalid(format!(
                "relay \"{name}\" prefix must start with http:// or https://"
            )));
        }
        relays.push(RelayOverride {
            name: name.to_string(),
            prefix: prefix.to_string(),
        });
    }
    Ok(relays)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
