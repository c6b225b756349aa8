// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the plugdex pipeline.
//!
//! TOML configuration with strict key checking (`deny_unknown_fields`),
//! XDG user config lookup, `PLUGDEX_*` environment overrides, the legacy
//! `AUTO_REMOVE_INVALID` flag, and miette diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use plugdex_config::load_and_validate;
//!
//! let config = load_and_validate(None).expect("config errors");
//! println!("plugins: {}", config.paths.plugins_dir);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{PlugdexConfig, ResolvedPaths, VersionOrderingMode};

/// Load configuration and validate it.
///
/// With `explicit = Some(path)` that file replaces the user and local config
/// files. Figment errors are converted into diagnostics with source spans.
pub fn load_and_validate(explicit: Option<&Path>) -> Result<PlugdexConfig, Vec<ConfigError>> {
    // Figment treats a missing file as empty; an explicit path must exist.
    if let Some(path) = explicit
        && !path.is_file()
    {
        return Err(vec![ConfigError::Other(format!(
            "config file not found: {}",
            path.display()
        ))]);
    }

    let result = match explicit {
        Some(path) => loader::load_config_from_path(path),
        None => loader::load_config(),
    };

    match result {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = collect_toml_sources(explicit);
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<PlugdexConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Read the TOML files that may have contributed to the config, for error spans.
fn collect_toml_sources(explicit: Option<&Path>) -> Vec<(String, String)> {
    let candidates: Vec<std::path::PathBuf> = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => {
            let local = std::env::current_dir()
                .map(|d| d.join(loader::CONFIG_FILE))
                .unwrap_or_else(|_| loader::CONFIG_FILE.into());
            loader::user_config_path().into_iter().chain([local]).collect()
        }
    };

    candidates
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            Some((path.display().to_string(), content))
        })
        .collect()
}
