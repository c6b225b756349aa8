// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Manifest updater for plugdex.
//!
//! For every manifest in the plugin directory, fetches package metadata from
//! its registry, picks the version to publish, and rewrites the manifest with
//! `latestVersion` and a single-entry `versions` list. Manifests whose package
//! the registry does not know are reported as invalid and optionally removed.

pub mod report;
pub mod updater;

pub use report::{FileOutcome, SkipReason, UpdateReport, UpdatedManifest};
pub use updater::{ManifestUpdater, UpdaterOptions};
