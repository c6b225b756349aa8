// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plugdex update` command implementation.

use plugdex_config::PlugdexConfig;
use plugdex_core::PlugdexError;
use plugdex_registry::HttpRegistry;
use plugdex_updater::{ManifestUpdater, UpdateReport, UpdaterOptions};

/// Refresh every manifest from its registry over HTTP.
///
/// `force_remove` turns auto-removal on regardless of configuration; it
/// cannot turn a configured removal off.
pub async fn run_update(
    config: &PlugdexConfig,
    force_remove: bool,
) -> Result<UpdateReport, PlugdexError> {
    let paths = config.paths.resolve();
    let mut options = UpdaterOptions::from_config(config);
    options.auto_remove_invalid |= force_remove;

    let client = HttpRegistry::from_config(&config.registry)?;
    ManifestUpdater::new(client, options)
        .run(&paths.plugins_dir)
        .await
}
