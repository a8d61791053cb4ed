//! # Configuration
//!
//! Tunables for the registration form: username length bounds, the live
//! validation quiet period, and the log level of the native front end.

use serde::{Deserialize, Serialize};
use std::time::Duration;
#[cfg(not(target_arch = "wasm32"))]
use std::{env, fs, path::Path};

use crate::errors::{FormError, FormResult};
use crate::validation::ValidationRules;

/// Environment variable overriding [`FormConfig::debounce_delay_ms`].
pub const ENV_DEBOUNCE_DELAY_MS: &str = "REGFORM_DEBOUNCE_DELAY_MS";
/// Environment variable overriding [`FormConfig::username_min`].
pub const ENV_USERNAME_MIN: &str = "REGFORM_USERNAME_MIN";
/// Environment variable overriding [`FormConfig::username_max`].
pub const ENV_USERNAME_MAX: &str = "REGFORM_USERNAME_MAX";
/// Environment variable overriding [`FormConfig::log_level`].
pub const ENV_LOG_LEVEL: &str = "REGFORM_LOG_LEVEL";

/// The main configuration structure for the registration form
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FormConfig {
    /// Quiet period before live validation runs, in milliseconds
    pub debounce_delay_ms: u32,

    /// Shortest accepted username, in UTF-16 code units
    pub username_min: usize,

    /// Longest accepted username, in UTF-16 code units
    pub username_max: usize,

    /// Logging level
    pub log_level: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FormConfig {
    /// Generates a default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            debounce_delay_ms: 500,
            username_min: 3,
            username_max: 25,
            log_level: "info".to_string(),
        }
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// Values present in the file win; environment variables only fill in
    /// values that are still at their defaults.
    ///
    /// # Arguments
    /// * `config_path` - Optional path to a `.yaml`/`.yml`, `.json` or `.toml` file.
    ///
    /// # Errors
    /// Returns a [`FormError`] if the file cannot be read or parsed, an
    /// environment variable is malformed, or the resolved values are invalid.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_config(config_path: Option<&Path>) -> FormResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::with_defaults(),
        };

        config.apply_env_overrides()?;
        config.validate()?;

        tracing::debug!(?config, "resolved form configuration");
        Ok(config)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn from_file(path: &Path) -> FormResult<Self> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| FormError::ConfigIo {
            path: display.clone(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => {
                serde_yml::from_str(&content)
                    .map_err(|e| FormError::config_parse(&display, e.to_string()))
            }
            Some("json") => {
                serde_json::from_str(&content)
                    .map_err(|e| FormError::config_parse(&display, e.to_string()))
            }
            Some("toml") => {
                toml::from_str(&content)
                    .map_err(|e| FormError::config_parse(&display, e.to_string()))
            }
            _ => Err(FormError::config_parse(
                display,
                "Unsupported configuration format. Use 'yaml', 'json' or 'toml'.",
            )),
        }
    }

    /// Apply `REGFORM_*` environment variables to values left at their defaults.
    ///
    /// # Errors
    /// Returns [`FormError::InvalidConfig`] if a variable is not a valid number.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn apply_env_overrides(&mut self) -> FormResult<()> {
        let defaults = Self::with_defaults();

        if self.debounce_delay_ms == defaults.debounce_delay_ms
            && let Some(value) = parse_env(ENV_DEBOUNCE_DELAY_MS)?
        {
            self.debounce_delay_ms = value;
        }
        if self.username_min == defaults.username_min
            && let Some(value) = parse_env(ENV_USERNAME_MIN)?
        {
            self.username_min = value;
        }
        if self.username_max == defaults.username_max
            && let Some(value) = parse_env(ENV_USERNAME_MAX)?
        {
            self.username_max = value;
        }
        if self.log_level == defaults.log_level
            && let Ok(level) = env::var(ENV_LOG_LEVEL)
        {
            self.log_level = level;
        }

        Ok(())
    }

    /// Validate the resolved configuration.
    ///
    /// # Errors
    /// Returns [`FormError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> FormResult<()> {
        if self.debounce_delay_ms == 0 {
            return Err(FormError::invalid_config(
                "debounce_delay_ms",
                "must be greater than 0",
            ));
        }
        if self.username_min == 0 {
            return Err(FormError::invalid_config(
                "username_min",
                "must be at least 1",
            ));
        }
        if self.username_min > self.username_max {
            return Err(FormError::invalid_config(
                "username_max",
                format!(
                    "must not be smaller than username_min ({})",
                    self.username_min
                ),
            ));
        }
        Ok(())
    }

    /// Quiet period of the live-validation debouncer.
    #[must_use]
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.debounce_delay_ms))
    }

    /// Field rules derived from this configuration.
    #[must_use]
    pub fn rules(&self) -> ValidationRules {
        ValidationRules {
            username_min: self.username_min,
            username_max: self.username_max,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_env<T: std::str::FromStr>(name: &str) -> FormResult<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| FormError::invalid_config(name, format!("`{raw}` is not a valid number"))),
        Err(_) => Ok(None),
    }
}
