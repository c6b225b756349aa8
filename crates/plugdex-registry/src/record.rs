// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builds the normalized [`VersionRecord`] written into a manifest.

use plugdex_core::types::{ANY_VERSION, DEFAULT_TARGET};
use plugdex_core::{DistRecord, PackageMetadata, VersionRecord};
use serde_json::Value;

/// Build the record for `version` of `package` as published on `registry`.
///
/// Fields the registry does not publish fall back to defaults: compatibility
/// ranges to `>=0.0.0`, targets to `["main"]`. `dist.npm`, `dist.tag` and
/// `dist.registry` are always set, even when `version` is not in the metadata.
pub fn build_version_record(
    package: &str,
    meta: &PackageMetadata,
    version: &str,
    registry: &str,
) -> VersionRecord {
    let vinfo = meta.versions.get(version);
    let dist = vinfo.and_then(|v| v.dist.as_ref());

    let desktop_compat = vinfo
        .and_then(|v| first_str(&[&v.desktop_compat, &v.desktop]))
        .unwrap_or(ANY_VERSION)
        .to_string();
    let sdk_compat = vinfo
        .and_then(|v| first_str(&[&v.sdk_compat, &v.sdk]))
        .unwrap_or(ANY_VERSION)
        .to_string();
    let targets = vinfo
        .and_then(|v| v.targets.as_ref())
        .map(string_list)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| vec![DEFAULT_TARGET.to_string()]);

    VersionRecord {
        version: version.to_string(),
        desktop_compat,
        sdk_compat,
        targets,
        dist: DistRecord {
            npm: package.to_string(),
            tag: version.to_string(),
            registry: registry.to_string(),
            integrity: dist.and_then(|d| non_empty(&d.integrity)),
            shasum: dist.and_then(|d| non_empty(&d.shasum)),
            tarball: dist.and_then(|d| non_empty(&d.tarball)),
        },
        readme: non_empty(&meta.readme_filename),
    }
}

fn first_str<'a>(candidates: &[&'a Option<Value>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|v| v.as_ref().and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) if !s.is_empty() => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}
