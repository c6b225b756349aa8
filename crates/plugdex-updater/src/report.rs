// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-file outcomes and the end-of-run report.

use std::path::{Path, PathBuf};

use plugdex_registry::SelectionReason;
use tracing::info;

/// Why a manifest was left alone without being an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Neither `package` nor `npm` is set.
    NoPackage,
    /// The registry publishes no `latest` dist-tag.
    NoLatestTag,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoPackage => write!(f, "no package field"),
            SkipReason::NoLatestTag => write!(f, "no latest tag"),
        }
    }
}

/// What happened to one manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The manifest was rewritten with a new version record.
    Updated {
        package: String,
        version: String,
        reason: SelectionReason,
    },
    /// Nothing to do for this manifest.
    Skipped(SkipReason),
    /// The registry reported the package as not found.
    NotFound { package: String },
    /// Loading, fetching or saving failed; the file was not modified.
    Failed { error: String },
}

/// A manifest rewritten during the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedManifest {
    pub file: PathBuf,
    pub package: String,
    pub version: String,
}

/// Summary of an updater run.
///
/// Every file lands in exactly one of `updated`, `skipped`, `failed` or
/// `invalid`. `removed` is the subset of `invalid` that was deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub updated: Vec<UpdatedManifest>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
    pub invalid: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
}

impl UpdateReport {
    /// Record the outcome for `file`.
    pub fn record(&mut self, file: PathBuf, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Updated {
                package, version, ..
            } => self.updated.push(UpdatedManifest {
                file,
                package,
                version,
            }),
            FileOutcome::Skipped(_) => self.skipped.push(file),
            FileOutcome::NotFound { .. } => self.invalid.push(file),
            FileOutcome::Failed { .. } => self.failed.push(file),
        }
    }

    /// Total number of manifest files seen.
    pub fn total(&self) -> usize {
        self.updated.len() + self.skipped.len() + self.failed.len() + self.invalid.len()
    }

    /// Comma-separated file names of invalid manifests.
    pub fn invalid_names(&self) -> String {
        self.invalid
            .iter()
            .map(|p| file_label(p))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Emit the one-line run summary.
    pub fn log_summary(&self) {
        info!(
            total = self.total(),
            updated = self.updated.len(),
            skipped = self.skipped.len(),
            failed = self.failed.len(),
            invalid = self.invalid.len(),
            removed = self.removed.len(),
            "manifest update finished"
        );
    }
}

/// File name for log output, falling back to the full path.
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_sorts_outcomes_into_buckets() {
        let mut report = UpdateReport::default();
        report.record(
            "a.yml".into(),
            FileOutcome::Updated {
                package: "a".into(),
                version: "1.0.0".into(),
                reason: SelectionReason::LatestTag,
            },
        );
        report.record("b.yml".into(), FileOutcome::Skipped(SkipReason::NoPackage));
        report.record("c.yml".into(), FileOutcome::NotFound { package: "c".into() });
        report.record("d.yml".into(), FileOutcome::Failed { error: "boom".into() });
        report.record("e.json".into(), FileOutcome::NotFound { package: "e".into() });

        assert_eq!(report.total(), 5);
        assert_eq!(report.updated[0].version, "1.0.0");
        assert_eq!(report.skipped, vec![PathBuf::from("b.yml")]);
        assert_eq!(report.failed, vec![PathBuf::from("d.yml")]);
        assert_eq!(report.invalid_names(), "c.yml, e.json");
    }

    #[test]
    fn skip_reason_display() {
        assert_eq!(SkipReason::NoPackage.to_string(), "no package field");
        assert_eq!(SkipReason::NoLatestTag.to_string(), "no latest tag");
    }
}
