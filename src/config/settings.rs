//! Service settings loading from a TOML file
//!
//! Settings are read from the file named by `ZISTA_CONFIG` (default `config.toml`).
//! Every field has a default, so a missing file or a missing section simply falls
//! back to the built-in values.

use crate::errors::{Error, Result};
use chrono::Duration;
use serde::Deserialize;
use std::{ops::RangeInclusive, path::Path};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Accepted reset token lifetimes, one minute up to one week.
pub const RESET_TOKEN_TTL_RANGE: RangeInclusive<i64> = 1..=10_080;

/// Configuration structure representing the entire settings file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// HTTP listener settings
    pub server: ServerSettings,
    /// Identity resolution settings
    pub auth: AuthSettings,
    /// Honey economy knobs
    pub honey: HoneySettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address to bind, e.g. `"0.0.0.0:3000"`
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Identity resolution settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Header carrying the email of the user authenticated by the upstream session layer
    pub identity_header: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            identity_header: "x-user-email".to_string(),
        }
    }
}

/// Honey economy knobs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HoneySettings {
    /// Honey credited to every new account
    pub welcome_bonus: i64,
    /// Lifetime of a password reset token in minutes
    pub reset_token_ttl_minutes: i64,
}

impl HoneySettings {
    /// Lifetime of a password reset token.
    #[must_use]
    pub fn reset_token_ttl(&self) -> Duration {
        Duration::minutes(self.reset_token_ttl_minutes)
    }
}

impl Default for HoneySettings {
    fn default() -> Self {
        Self {
            welcome_bonus: 100,
            reset_token_ttl_minutes: 60,
        }
    }
}

impl Settings {
    /// Rejects values the service cannot run with.
    ///
    /// # Errors
    /// Returns `Error::Config` naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        let ttl = self.honey.reset_token_ttl_minutes;
        if !RESET_TOKEN_TTL_RANGE.contains(&ttl) {
            return Err(Error::Config {
                message: format!(
                    "honey.reset_token_ttl_minutes must be between {} and {}, got {ttl}",
                    RESET_TOKEN_TTL_RANGE.start(),
                    RESET_TOKEN_TTL_RANGE.end()
                ),
            });
        }
        if self.honey.welcome_bonus < 0 {
            return Err(Error::Config {
                message: format!(
                    "honey.welcome_bonus must not be negative, got {}",
                    self.honey.welcome_bonus
                ),
            });
        }
        Ok(())
    }
}

/// Loads and validates settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML is invalid or a value is
/// out of range.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    let settings: Settings = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings file: {e}"),
    })?;
    settings.validate()?;
    Ok(settings)
}

/// Loads settings from `ZISTA_CONFIG` or `./config.toml`, using defaults when the
/// file does not exist.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var("ZISTA_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if Path::new(&path).exists() {
        tracing::info!("Loading settings from {path}");
        load_settings(path)
    } else {
        tracing::info!("No settings file at {path}, using defaults");
        Ok(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_settings() {
        let toml_str = r#"
            [server]
            bind_address = "127.0.0.1:8080"

            [auth]
            identity_header = "x-forwarded-email"

            [honey]
            welcome_bonus = 250
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.server.bind_address, "127.0.0.1:8080");
        assert_eq!(settings.auth.identity_header, "x-forwarded-email");
        assert_eq!(settings.honey.welcome_bonus, 250);
        // Unset keys keep their defaults
        assert_eq!(settings.honey.reset_token_ttl_minutes, 60);
    }

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.server.bind_address, "0.0.0.0:3000");
        assert_eq!(settings.auth.identity_header, "x-user-email");
        assert_eq!(settings.honey.welcome_bonus, 100);
    }

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.honey.reset_token_ttl(), Duration::hours(1));
    }

    #[test]
    fn test_reset_token_ttl_out_of_range_rejected() {
        for ttl in [0, -5, 10_081, i64::MAX] {
            let toml_str = format!("[honey]\nreset_token_ttl_minutes = {ttl}\n");
            let settings: Settings = toml::from_str(&toml_str).unwrap();
            assert!(
                matches!(settings.validate(), Err(Error::Config { .. })),
                "ttl {ttl} should be rejected"
            );
        }

        let week: Settings = toml::from_str("[honey]\nreset_token_ttl_minutes = 10080\n").unwrap();
        assert!(week.validate().is_ok());
    }

    #[test]
    fn test_load_settings_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[honey]\nreset_token_ttl_minutes = 9999999999999\n").unwrap();

        let result = load_settings(&path);
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_settings_missing_file() {
        let result = load_settings("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
