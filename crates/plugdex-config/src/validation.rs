// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::PlugdexConfig;

/// Accepted values for `logging.log_level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Longest per-request registry timeout accepted.
const MAX_TIMEOUT_SECS: u64 = 300;

/// Validate a deserialized configuration.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &PlugdexConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let paths = [
        ("paths.root", &config.paths.root),
        ("paths.plugins_dir", &config.paths.plugins_dir),
        ("paths.base_config", &config.paths.base_config),
        ("paths.output", &config.paths.output),
    ];
    for (key, value) in paths {
        if value.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        }
    }

    let url = config.registry.default_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("registry.default_url `{url}` must be an http:// or https:// URL"),
        });
    }

    let timeout = config.registry.timeout_secs;
    if timeout == 0 || timeout > MAX_TIMEOUT_SECS {
        errors.push(ConfigError::Validation {
            message: format!(
                "registry.timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}, got {timeout}"
            ),
        });
    }

    let level = config.logging.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.log_level `{}` is not one of: {}",
                config.logging.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
