//! Configuration file loading and validation.

use std::path::Path;

use crate::error::ConfigError;
use crate::types::ReplayConfig;

/// Loads and validates a `restep.toml` configuration file.
///
/// # Errors
///
/// Returns [`ConfigError`] on I/O, parse, or validation failures.
pub fn load_config_file(path: &Path) -> Result<ReplayConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
///
/// # Errors
///
/// Returns [`ConfigError`] on parse or validation failures.
pub fn load_config_from_str(content: &str) -> Result<ReplayConfig, ConfigError> {
    let config: ReplayConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are usable.
fn validate_config(config: &ReplayConfig) -> Result<(), ConfigError> {
    if config.trace.max_name_length == 0 {
        return Err(ConfigError::ValidationError(
            "trace.max_name_length must be positive".to_string(),
        ));
    }
    if config.classify.input_prefix.is_empty() {
        return Err(ConfigError::ValidationError(
            "classify.input_prefix must not be empty".to_string(),
        ));
    }
    Ok(())
}
