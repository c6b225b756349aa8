// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Version selection policy.
//!
//! The registry's `latest` tag wins when it names a published version.
//! Otherwise the highest published version under the injected
//! [`VersionOrdering`] is chosen, and with nothing published the bare tag is
//! used unverified.

use std::cmp::Ordering;

use plugdex_config::VersionOrderingMode;
use plugdex_core::PackageMetadata;

/// Comparator used to rank published version strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionOrdering {
    /// Semantic-version-aware. Strings that are not valid semver rank below
    /// every valid one and compare as plain strings among themselves.
    #[default]
    Semantic,
    /// Plain string comparison. Degraded mode: `1.9.0` beats `1.10.0`.
    Lexical,
}

impl VersionOrdering {
    /// Compare two version strings; `Greater` means `a` is newer.
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            VersionOrdering::Lexical => a.cmp(b),
            VersionOrdering::Semantic => match (parse_semver(a), parse_semver(b)) {
                (Some(va), Some(vb)) => va.cmp(&vb).then_with(|| a.cmp(b)),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => a.cmp(b),
            },
        }
    }

    /// The highest version in `versions`, if any.
    pub fn highest<'a, I>(self, versions: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        versions.into_iter().max_by(|a, b| self.compare(a, b))
    }
}

impl From<VersionOrderingMode> for VersionOrdering {
    fn from(mode: VersionOrderingMode) -> Self {
        match mode {
            VersionOrderingMode::Semver => VersionOrdering::Semantic,
            VersionOrderingMode::Lexical => VersionOrdering::Lexical,
        }
    }
}

fn parse_semver(raw: &str) -> Option<semver::Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('='))
        .unwrap_or(trimmed);
    semver::Version::parse(trimmed).ok()
}

/// Why a version was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionReason {
    /// The `latest` tag names a published version.
    LatestTag,
    /// `latest` is not published; the highest published version was used.
    Highest,
    /// Nothing is published; the `latest` tag string is used as-is.
    UnverifiedTag,
}

impl std::fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionReason::LatestTag => write!(f, "latest-tag"),
            SelectionReason::Highest => write!(f, "highest"),
            SelectionReason::UnverifiedTag => write!(f, "unverified-tag"),
        }
    }
}

/// A chosen version and how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedVersion {
    pub version: String,
    pub reason: SelectionReason,
}

/// Pick the version to publish for a package.
///
/// Returns `None` when the registry has no `latest` tag.
pub fn select_version(meta: &PackageMetadata, ordering: VersionOrdering) -> Option<SelectedVersion> {
    let latest = meta.latest_tag()?;

    if meta.versions.contains_key(latest) {
        return Some(SelectedVersion {
            version: latest.to_string(),
            reason: SelectionReason::LatestTag,
        });
    }

    match ordering.highest(meta.versions.keys().map(String::as_str)) {
        Some(highest) => Some(SelectedVersion {
            version: highest.to_string(),
            reason: SelectionReason::Highest,
        }),
        None => Some(SelectedVersion {
            version: latest.to_string(),
            reason: SelectionReason::UnverifiedTag,
        }),
    }
}
