//! Pipeline configuration - runtime-tunable knobs as TOML values
//!
//! The filter passband and order are compile-time constants in
//! [`super::defaults`]; everything an operator may reasonably tune per
//! deployment lives here. Each field has a default matching the original
//! constants, so behaviour is unchanged when no config file is present.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ROADSCORE_CONFIG";

/// Config file searched in the working directory when the env var is unset.
pub const CONFIG_FILE_NAME: &str = "roadscore.toml";

/// Errors raised while loading or validating a [`PipelineConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for {field}: {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Runtime configuration consumed by the scoring pipeline.
///
/// Load with [`PipelineConfig::load`] which searches:
/// 1. `$ROADSCORE_CONFIG` env var
/// 2. `./roadscore.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Speed gate threshold (km/h); submissions slower than this score zero
    #[serde(default = "default_min_speed_kmh")]
    pub min_speed_kmh: f64,

    /// Floor for the resampling rate derived from observed sample spacing (Hz)
    #[serde(default = "default_min_target_rate_hz")]
    pub min_target_rate_hz: f64,

    /// Ceiling for the derived resampling rate (Hz)
    #[serde(default = "default_max_target_rate_hz")]
    pub max_target_rate_hz: f64,
}

fn default_min_speed_kmh() -> f64 {
    defaults::MIN_SPEED_KMH
}

fn default_min_target_rate_hz() -> f64 {
    defaults::MIN_TARGET_RATE_HZ
}

fn default_max_target_rate_hz() -> f64 {
    defaults::MAX_TARGET_RATE_HZ
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_speed_kmh: default_min_speed_kmh(),
            min_target_rate_hz: default_min_target_rate_hz(),
            max_target_rate_hz: default_max_target_rate_hz(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration using the standard search order:
    /// 1. `$ROADSCORE_CONFIG` environment variable
    /// 2. `./roadscore.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// A file that fails to load or validate falls through to the next
    /// source with a warning; this never aborts startup.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            match Self::load_from_file(&path) {
                Ok(config) => {
                    info!(path = %path, "Loaded pipeline config from {CONFIG_ENV_VAR}");
                    return config;
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "Failed to load config from {CONFIG_ENV_VAR}, falling back");
                }
            }
        }

        if Path::new(CONFIG_FILE_NAME).exists() {
            match Self::load_from_file(CONFIG_FILE_NAME) {
                Ok(config) => {
                    info!(path = CONFIG_FILE_NAME, "Loaded pipeline config");
                    return config;
                }
                Err(e) => {
                    warn!(path = CONFIG_FILE_NAME, error = %e, "Failed to load local config, using defaults");
                }
            }
        }

        Self::default()
    }

    /// Load and validate a config from an explicit TOML file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_speed_kmh.is_finite() || self.min_speed_kmh < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "min_speed_kmh",
                value: self.min_speed_kmh,
                reason: "must be finite and non-negative",
            });
        }
        if !self.min_target_rate_hz.is_finite() || self.min_target_rate_hz <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "min_target_rate_hz",
                value: self.min_target_rate_hz,
                reason: "must be finite and positive",
            });
        }
        if !self.max_target_rate_hz.is_finite() || self.max_target_rate_hz < self.min_target_rate_hz
        {
            return Err(ConfigError::InvalidValue {
                field: "max_target_rate_hz",
                value: self.max_target_rate_hz,
                reason: "must be finite and >= min_target_rate_hz",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = PipelineConfig::default();
        assert_eq!(config.min_speed_kmh, defaults::MIN_SPEED_KMH);
        assert_eq!(config.min_target_rate_hz, defaults::MIN_TARGET_RATE_HZ);
        assert_eq!(config.max_target_rate_hz, defaults::MAX_TARGET_RATE_HZ);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: PipelineConfig = toml::from_str("min_speed_kmh = 5.0").unwrap();
        assert_eq!(config.min_speed_kmh, 5.0);
        assert_eq!(config.max_target_rate_hz, defaults::MAX_TARGET_RATE_HZ);
    }

    #[test]
    fn test_validate_rejects_negative_speed_threshold() {
        let config = PipelineConfig {
            min_speed_kmh: -1.0,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "min_speed_kmh", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_rate_bounds() {
        let config = PipelineConfig {
            min_target_rate_hz: 100.0,
            max_target_rate_hz: 10.0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let err = PipelineConfig::load_from_file("/nonexistent/roadscore.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
