// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Registry metadata and normalized version record types.
//!
//! [`PackageMetadata`] is the subset of a registry package document the
//! pipeline reads. [`VersionRecord`] is the single entry written into a
//! manifest's `versions` sequence after an update.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Compatibility range used when upstream metadata does not declare one.
pub const ANY_VERSION: &str = ">=0.0.0";

/// Build target used when upstream metadata does not declare any.
pub const DEFAULT_TARGET: &str = "main";

/// Package metadata document returned by `GET {registry}/{package}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageMetadata {
    /// Published versions keyed by version string.
    #[serde(default)]
    pub versions: BTreeMap<String, VersionMetadata>,

    /// Distribution tags (`latest`, `next`, ...) mapped to version strings.
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: BTreeMap<String, String>,

    /// File name of the package readme, if published.
    #[serde(rename = "readmeFilename", default)]
    pub readme_filename: Option<String>,
}

impl PackageMetadata {
    /// The version the registry designates as `latest`, if non-empty.
    pub fn latest_tag(&self) -> Option<&str> {
        self.dist_tags
            .get("latest")
            .map(String::as_str)
            .filter(|tag| !tag.is_empty())
    }
}

/// Metadata for one published version.
///
/// Compatibility and target fields are kept as raw JSON because publishers
/// are not consistent about their types.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionMetadata {
    #[serde(default)]
    pub dist: Option<DistMetadata>,
    #[serde(rename = "desktopCompat", default)]
    pub desktop_compat: Option<Value>,
    #[serde(default)]
    pub desktop: Option<Value>,
    #[serde(rename = "sdkCompat", default)]
    pub sdk_compat: Option<Value>,
    #[serde(default)]
    pub sdk: Option<Value>,
    #[serde(default)]
    pub targets: Option<Value>,
}

/// The `dist` block of a published version.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistMetadata {
    #[serde(default)]
    pub integrity: Option<String>,
    #[serde(default)]
    pub shasum: Option<String>,
    #[serde(default)]
    pub tarball: Option<String>,
}

/// Normalized single-version record stored in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub version: String,
    pub desktop_compat: String,
    pub sdk_compat: String,
    pub targets: Vec<String>,
    pub dist: DistRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
}

/// Where to fetch the selected version from.
///
/// `npm`, `tag` and `registry` are always present; the rest are copied from
/// the registry when it publishes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistRecord {
    pub npm: String,
    pub tag: String,
    pub registry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shasum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tarball: Option<String>,
}
