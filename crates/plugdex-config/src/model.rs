// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the plugdex pipeline.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key in
//! `plugdex.toml` is reported instead of silently ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level plugdex configuration.
///
/// Every section is optional; an empty file yields the defaults the
/// repository layout expects (`index/plugins`, `base.json`, `index/index.json`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlugdexConfig {
    /// Repository layout.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Package registry access.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Manifest updater behavior.
    #[serde(default)]
    pub updater: UpdaterConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Repository layout. Relative paths are resolved against `root`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Repository root; manifest `__source` paths are recorded relative to it.
    #[serde(default = "default_root")]
    pub root: String,

    /// Directory holding one manifest file per plugin.
    #[serde(default = "default_plugins_dir")]
    pub plugins_dir: String,

    /// Optional base configuration document merged into the index.
    #[serde(default = "default_base_config")]
    pub base_config: String,

    /// Where the aggregate index is written.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            plugins_dir: default_plugins_dir(),
            base_config: default_base_config(),
            output: default_output(),
        }
    }
}

impl PathsConfig {
    /// Resolve every path against the configured root.
    pub fn resolve(&self) -> ResolvedPaths {
        let root = PathBuf::from(&self.root);
        ResolvedPaths {
            plugins_dir: root.join(&self.plugins_dir),
            base_config: root.join(&self.base_config),
            output: root.join(&self.output),
            root,
        }
    }
}

/// Absolute-or-root-relative paths derived from [`PathsConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub root: PathBuf,
    pub plugins_dir: PathBuf,
    pub base_config: PathBuf,
    pub output: PathBuf,
}

impl ResolvedPaths {
    /// Paths for a repository rooted at `root` with the default layout.
    pub fn for_root(root: &Path) -> Self {
        PathsConfig {
            root: root.display().to_string(),
            ..PathsConfig::default()
        }
        .resolve()
    }
}

fn default_root() -> String {
    ".".to_string()
}

fn default_plugins_dir() -> String {
    "index/plugins".to_string()
}

fn default_base_config() -> String {
    "base.json".to_string()
}

fn default_output() -> String {
    "index/index.json".to_string()
}

/// How published version strings are ordered when `latest` is not among them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionOrderingMode {
    /// Semantic-version-aware ordering.
    #[default]
    Semver,
    /// Plain string ordering. Weaker: `1.9.0` ranks above `1.10.0`.
    Lexical,
}

/// Package registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Registry queried for manifests that do not declare their own `registry`.
    #[serde(default = "default_registry_url")]
    pub default_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Ordering used to pick the highest published version.
    #[serde(default)]
    pub version_ordering: VersionOrderingMode,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_url: default_registry_url(),
            timeout_secs: default_timeout_secs(),
            version_ordering: VersionOrderingMode::default(),
        }
    }
}

fn default_registry_url() -> String {
    "https://registry.npmjs.org".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Manifest updater configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UpdaterConfig {
    /// Delete manifests whose package the registry reports as not found.
    /// When false they are only listed in the run summary.
    #[serde(default)]
    pub auto_remove_invalid: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Level for plugdex targets (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
