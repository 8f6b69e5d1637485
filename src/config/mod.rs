//! Pipeline Configuration Module
//!
//! Runtime-tunable values load from TOML (see [`PipelineConfig::load`] for
//! the search order); fixed numeric configuration such as the filter
//! passband lives in [`defaults`].

mod pipeline_config;
pub mod defaults;

pub use pipeline_config::{ConfigError, PipelineConfig, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
