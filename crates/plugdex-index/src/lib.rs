// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Index generator for plugdex.
//!
//! Aggregates every manifest in the plugin directory, together with the
//! optional `base.json`, into a single `index.json` document.

pub mod base;
pub mod collect;
pub mod payload;

use chrono::{DateTime, Utc};
use plugdex_config::ResolvedPaths;
use plugdex_core::PlugdexError;
use tracing::info;

pub use base::load_base_config;
pub use collect::collect_manifests;
pub use payload::{build_payload, render_payload, write_output, IndexPayload, SCHEMA_VERSION};

/// Outcome of a generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub plugins: usize,
    pub has_mirrors: bool,
}

/// Build and write the index for the repository described by `paths`.
///
/// Fails only when the plugin directory is missing or the output cannot be
/// written; unreadable manifests and a bad `base.json` are logged and skipped.
pub fn generate_index(paths: &ResolvedPaths, now: DateTime<Utc>) -> Result<IndexSummary, PlugdexError> {
    let base = load_base_config(&paths.base_config);
    let plugins = collect_manifests(&paths.root, &paths.plugins_dir)?;
    let payload = build_payload(plugins, &base, now);
    write_output(&paths.output, &payload)?;

    let summary = IndexSummary {
        plugins: payload.plugins.len(),
        has_mirrors: payload.mirrors.is_some(),
    };
    info!(
        output = %paths.output.display(),
        plugins = summary.plugins,
        mirrors = summary.has_mirrors,
        "index written"
    );
    Ok(summary)
}
