// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary plugin repositories for tests.
//!
//! `PluginRepo` owns a temp directory laid out with the default paths
//! (`index/plugins/`, `base.json`, `index/index.json`). Helpers panic on I/O
//! failure since they only run inside tests.

use std::path::{Path, PathBuf};

use plugdex_config::ResolvedPaths;
use tempfile::TempDir;

/// A throwaway repository root with an empty plugin directory.
pub struct PluginRepo {
    dir: TempDir,
    paths: ResolvedPaths,
}

impl PluginRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let paths = ResolvedPaths::for_root(dir.path());
        std::fs::create_dir_all(&paths.plugins_dir).expect("create plugins dir");
        Self { dir, paths }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn paths(&self) -> &ResolvedPaths {
        &self.paths
    }

    pub fn plugins_dir(&self) -> &Path {
        &self.paths.plugins_dir
    }

    /// Write a manifest into the plugin directory and return its path.
    pub fn write_plugin(&self, name: &str, content: &str) -> PathBuf {
        let path = self.paths.plugins_dir.join(name);
        std::fs::write(&path, content).expect("write manifest");
        path
    }

    pub fn read_plugin(&self, name: &str) -> String {
        std::fs::read_to_string(self.paths.plugins_dir.join(name)).expect("read manifest")
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.paths.plugins_dir.join(name).exists()
    }

    pub fn write_base(&self, content: &str) {
        std::fs::write(&self.paths.base_config, content).expect("write base config");
    }

    /// Raw text of the generated index.
    pub fn read_output(&self) -> String {
        std::fs::read_to_string(&self.paths.output).expect("read index")
    }

    /// The generated index parsed as JSON.
    pub fn read_index(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_output()).expect("index is JSON")
    }
}

impl Default for PluginRepo {
    fn default() -> Self {
        Self::new()
    }
}
