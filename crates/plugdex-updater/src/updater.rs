// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The manifest updater job.
//!
//! Walks the plugin directory once, sequentially. Each manifest is fetched,
//! resolved and rewritten independently; a failure on one file never stops
//! the batch. Only a missing plugin directory aborts the run.

use std::path::Path;

use plugdex_config::PlugdexConfig;
use plugdex_core::{list_manifest_files, load_manifest, save_manifest, PackageSource, PlugdexError};
use plugdex_registry::{build_version_record, select_version, VersionOrdering};
use tracing::{info, warn};

use crate::report::{file_label, FileOutcome, SkipReason, UpdateReport};

/// Knobs for a single updater run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdaterOptions {
    /// Registry used when a manifest does not declare one.
    pub default_registry: String,
    /// Ordering applied when `latest` is not a published version.
    pub ordering: VersionOrdering,
    /// Delete manifests whose package is not found instead of only reporting them.
    pub auto_remove_invalid: bool,
}

impl UpdaterOptions {
    pub fn from_config(config: &PlugdexConfig) -> Self {
        Self {
            default_registry: config.registry.default_url.clone(),
            ordering: config.registry.version_ordering.into(),
            auto_remove_invalid: config.updater.auto_remove_invalid,
        }
    }
}

/// Refreshes manifests from a [`PackageSource`].
pub struct ManifestUpdater<S> {
    source: S,
    options: UpdaterOptions,
}

impl<S: PackageSource> ManifestUpdater<S> {
    pub fn new(source: S, options: UpdaterOptions) -> Self {
        Self { source, options }
    }

    /// Update every manifest in `plugins_dir`, then handle not-found packages.
    ///
    /// Returns [`PlugdexError::MissingDirectory`] if `plugins_dir` does not
    /// exist; every other problem is logged and recorded in the report.
    pub async fn run(&self, plugins_dir: &Path) -> Result<UpdateReport, PlugdexError> {
        let files = list_manifest_files(plugins_dir)?;
        info!(dir = %plugins_dir.display(), files = files.len(), "updating manifests");

        let mut report = UpdateReport::default();
        for path in files {
            let outcome = self.update_file(&path).await;
            report.record(path, outcome);
        }

        self.handle_invalid(&mut report);
        report.log_summary();
        Ok(report)
    }

    /// Refresh a single manifest file in place.
    pub async fn update_file(&self, path: &Path) -> FileOutcome {
        let file = file_label(path);

        let mut manifest = match load_manifest(path) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!(%file, error = %e, "failed to load manifest");
                return FileOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let Some(package) = manifest.package_name().map(str::to_string) else {
            info!(%file, "skip (no package field)");
            return FileOutcome::Skipped(SkipReason::NoPackage);
        };
        let registry = manifest
            .registry()
            .unwrap_or(&self.options.default_registry)
            .to_string();

        let meta = match self.source.fetch_package(&registry, &package).await {
            Ok(meta) => meta,
            Err(e) if e.is_not_found() => {
                warn!(%file, %package, %registry, "package not found, marking invalid");
                return FileOutcome::NotFound { package };
            }
            Err(e) => {
                warn!(%file, %package, %registry, error = %e, "registry fetch failed");
                return FileOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let Some(selected) = select_version(&meta, self.options.ordering) else {
            info!(%file, %package, "skip (no latest tag)");
            return FileOutcome::Skipped(SkipReason::NoLatestTag);
        };

        let record = build_version_record(&package, &meta, &selected.version, &registry);
        let saved = manifest
            .set_selected_version(&record)
            .and_then(|()| save_manifest(path, &manifest));
        if let Err(e) = saved {
            warn!(%file, %package, error = %e, "failed to write manifest");
            return FileOutcome::Failed {
                error: e.to_string(),
            };
        }

        info!(%file, %package, version = %selected.version, reason = %selected.reason, "updated");
        FileOutcome::Updated {
            package,
            version: selected.version,
            reason: selected.reason,
        }
    }

    /// Remove or report manifests whose package the registry does not know.
    fn handle_invalid(&self, report: &mut UpdateReport) {
        if report.invalid.is_empty() {
            return;
        }

        if !self.options.auto_remove_invalid {
            warn!(files = %report.invalid_names(), "invalid packages (not removed)");
            return;
        }

        for path in &report.invalid {
            let file = file_label(path);
            match std::fs::remove_file(path) {
                Ok(()) => {
                    info!(%file, "removed invalid manifest");
                    report.removed.push(path.clone());
                }
                Err(e) => warn!(%file, error = %e, "failed to remove invalid manifest"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugdex_test_utils::{MockRegistry, PluginRepo};
    use plugdex_registry::SelectionReason;
    use tracing_test::traced_test;

    fn options() -> UpdaterOptions {
        UpdaterOptions {
            default_registry: "https://registry.test".into(),
            ordering: VersionOrdering::Semantic,
            auto_remove_invalid: false,
        }
    }

    #[tokio::test]
    async fn update_file_writes_selected_version() {
        let repo = PluginRepo::new();
        let path = repo.write_plugin("weather.yml", "id: weather\npackage: astro-weather\n");
        let registry = MockRegistry::new().with_package(
            "astro-weather",
            serde_json::json!({
                "dist-tags": {"latest": "1.2.0"},
                "versions": {"1.2.0": {}, "1.1.0": {}}
            }),
        );

        let updater = ManifestUpdater::new(registry, options());
        let outcome = updater.update_file(&path).await;
        assert_eq!(
            outcome,
            FileOutcome::Updated {
                package: "astro-weather".into(),
                version: "1.2.0".into(),
                reason: SelectionReason::LatestTag,
            }
        );

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(manifest.str_field("latestVersion"), Some("1.2.0"));
        assert_eq!(
            manifest.get("versions").unwrap()[0]["dist"]["registry"],
            "https://registry.test"
        );
    }

    #[tokio::test]
    async fn manifest_registry_overrides_default() {
        let repo = PluginRepo::new();
        let path = repo.write_plugin(
            "mirror.json",
            r#"{"package": "mirrored", "registry": "https://mirror.test/"}"#,
        );
        let registry = MockRegistry::new().with_package(
            "mirrored",
            serde_json::json!({"dist-tags": {"latest": "0.1.0"}, "versions": {"0.1.0": {}}}),
        );

        let updater = ManifestUpdater::new(registry, options());
        updater.update_file(&path).await;

        let calls = updater.source.calls();
        assert_eq!(calls, vec![("https://mirror.test/".to_string(), "mirrored".to_string())]);
    }

    #[tokio::test]
    async fn missing_package_field_is_skipped_without_fetch() {
        let repo = PluginRepo::new();
        let path = repo.write_plugin("bare.yml", "id: bare\nname: Bare\n");
        let updater = ManifestUpdater::new(MockRegistry::new(), options());

        let outcome = updater.update_file(&path).await;
        assert_eq!(outcome, FileOutcome::Skipped(SkipReason::NoPackage));
        assert!(updater.source.calls().is_empty());
    }

    #[tokio::test]
    async fn unparsable_manifest_is_failed_not_fatal() {
        let repo = PluginRepo::new();
        let path = repo.write_plugin("broken.json", "{\"package\": ");
        let updater = ManifestUpdater::new(MockRegistry::new(), options());

        let outcome = updater.update_file(&path).await;
        assert!(matches!(outcome, FileOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn run_fails_only_for_missing_directory() {
        let repo = PluginRepo::new();
        let updater = ManifestUpdater::new(MockRegistry::new(), options());
        let err = updater.run(&repo.root().join("nowhere")).await.unwrap_err();
        assert!(matches!(err, PlugdexError::MissingDirectory { .. }));
    }

    #[tokio::test]
    #[traced_test]
    async fn invalid_packages_are_reported_when_not_removing() {
        let repo = PluginRepo::new();
        repo.write_plugin("ghost.yml", "package: ghost\n");
        let updater = ManifestUpdater::new(MockRegistry::new(), options());

        let report = updater.run(repo.plugins_dir()).await.unwrap();
        assert_eq!(report.invalid.len(), 1);
        assert!(report.removed.is_empty());
        assert!(repo.has_plugin("ghost.yml"));
        assert!(logs_contain("invalid packages (not removed)"));
        assert!(logs_contain("ghost.yml"));
    }
}
