// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reads every manifest in the plugin directory for the index.

use std::path::Path;

use plugdex_core::{list_manifest_files, load_manifest, Manifest, PlugdexError, SOURCE_KEY};
use serde_json::Value;
use tracing::{debug, warn};

/// Load, tag and sort all manifests in `plugins_dir`.
///
/// Each manifest gets `__source` set to its path relative to `root` with
/// forward slashes. Files that fail to load are logged and skipped. The
/// result is stably sorted by [`Manifest::sort_key`] over the file-name
/// order, so ties keep a deterministic order.
pub fn collect_manifests(root: &Path, plugins_dir: &Path) -> Result<Vec<Manifest>, PlugdexError> {
    let files = list_manifest_files(plugins_dir)?;

    let mut items = Vec::with_capacity(files.len());
    for path in files {
        match load_manifest(&path) {
            Ok(mut manifest) => {
                manifest.insert(SOURCE_KEY, Value::String(source_path(root, &path)));
                items.push(manifest);
            }
            Err(e) => {
                let file = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
                warn!(%file, error = %e, "skip manifest");
            }
        }
    }

    items.sort_by_cached_key(Manifest::sort_key);
    debug!(count = items.len(), "collected manifests");
    Ok(items)
}

/// `path` relative to `root` with `/` separators. Paths outside `root` are
/// kept as given.
fn source_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.display().to_string(),
    }
}
