// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merge order (later overrides earlier):
//! 1. Compiled defaults
//! 2. `~/.config/plugdex/plugdex.toml` (user XDG config)
//! 3. `./plugdex.toml`, or the file passed with `--config`
//! 4. `AUTO_REMOVE_INVALID` (legacy flag, accepts `1`/`true`/`yes`)
//! 5. `PLUGDEX_*` environment variables

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PlugdexConfig;

/// Name of the local configuration file.
pub const CONFIG_FILE: &str = "plugdex.toml";

/// Legacy environment flag controlling removal of not-found manifests.
pub const LEGACY_AUTO_REMOVE_ENV: &str = "AUTO_REMOVE_INVALID";

/// Load configuration from the XDG hierarchy with env var overrides.
pub fn load_config() -> Result<PlugdexConfig, figment::Error> {
    build_figment(None).extract()
}

/// Load configuration from a specific file instead of `./plugdex.toml`.
pub fn load_config_from_path(path: &Path) -> Result<PlugdexConfig, figment::Error> {
    build_figment(Some(path)).extract()
}

/// Load configuration from a TOML string only (no files, no environment).
pub fn load_config_from_str(toml_content: &str) -> Result<PlugdexConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlugdexConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Build the Figment used for config loading.
///
/// `explicit` replaces both the user and the local config file.
pub fn build_figment(explicit: Option<&Path>) -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(PlugdexConfig::default()));

    figment = match explicit {
        Some(path) => figment.merge(Toml::file(path)),
        None => figment
            .merge(Toml::file(user_config_path().unwrap_or_default()))
            .merge(Toml::file(CONFIG_FILE)),
    };

    let legacy = std::env::var(LEGACY_AUTO_REMOVE_ENV).ok();
    if let Some(flag) = parse_legacy_flag(legacy.as_deref()) {
        figment = figment.merge(("updater.auto_remove_invalid", flag));
    }

    figment.merge(env_provider())
}

/// Location of the per-user config file, if the platform has a config dir.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("plugdex").join(CONFIG_FILE))
}

/// Interpret the legacy `AUTO_REMOVE_INVALID` value.
///
/// Unset means "no opinion"; any set value other than `1`, `true` or `yes`
/// (case-insensitive) disables removal.
pub fn parse_legacy_flag(value: Option<&str>) -> Option<bool> {
    let value = value?.trim().to_ascii_lowercase();
    Some(matches!(value.as_str(), "1" | "true" | "yes"))
}

/// Environment provider mapping `PLUGDEX_SECTION_KEY` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `PLUGDEX_UPDATER_AUTO_REMOVE_INVALID` must become
/// `updater.auto_remove_invalid`.
fn env_provider() -> Env {
    Env::prefixed("PLUGDEX_").map(|key| {
        // Keys reach the closure in their original case.
        let mapped = key
            .as_str()
            .to_ascii_lowercase()
            .replacen("paths_", "paths.", 1)
            .replacen("registry_", "registry.", 1)
            .replacen("updater_", "updater.", 1)
            .replacen("logging_", "logging.", 1);
        mapped.into()
    })
}
