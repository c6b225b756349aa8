// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin manifest documents and their on-disk codec.
//!
//! Manifests are kept as ordered JSON objects rather than typed structs:
//! the pipeline only reads a handful of keys and must write every other key
//! back untouched, in its original order. YAML and JSON files share this
//! representation; the format is chosen from the file extension.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::PlugdexError;
use crate::types::VersionRecord;

/// Key under which the index generator records a manifest's source path.
pub const SOURCE_KEY: &str = "__source";

/// File extensions recognized as manifests.
pub const MANIFEST_EXTENSIONS: &[&str] = &["yml", "yaml", "json"];

/// Serialization format of a manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    /// Infer the format from a path's extension (case-insensitive).
    ///
    /// Returns `None` for files that are not manifests.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ManifestFormat::Json),
            "yml" | "yaml" => Some(ManifestFormat::Yaml),
            _ => None,
        }
    }
}

/// A plugin manifest: an insertion-ordered key-value mapping.
///
/// Serializes as the bare mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    fields: Map<String, Value>,
}

impl Manifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing JSON object.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Borrow the underlying mapping.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Insert a value. Existing keys keep their position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Return a field as a non-empty string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// The registry package name: `package`, falling back to the legacy `npm` key.
    pub fn package_name(&self) -> Option<&str> {
        self.str_field("package").or_else(|| self.str_field("npm"))
    }

    /// The registry base URL declared by the manifest, if any.
    pub fn registry(&self) -> Option<&str> {
        self.str_field("registry")
    }

    /// Case-insensitive ordering key: `id`, else `name`, else the recorded source path.
    pub fn sort_key(&self) -> String {
        self.str_field("id")
            .or_else(|| self.str_field("name"))
            .or_else(|| self.str_field(SOURCE_KEY))
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Replace the version history with a single record and set `latestVersion`.
    pub fn set_selected_version(&mut self, record: &VersionRecord) -> Result<(), PlugdexError> {
        let entry = serde_json::to_value(record)
            .map_err(|e| PlugdexError::Internal(format!("failed to encode version record: {e}")))?;
        self.insert("latestVersion", Value::String(record.version.clone()));
        self.insert("versions", Value::Array(vec![entry]));
        Ok(())
    }
}

/// Parse manifest content in the given format.
///
/// An empty (or comment-only) YAML document is an empty manifest. Anything
/// that does not parse to a mapping is a [`PlugdexError::ManifestShape`].
pub fn parse_manifest(
    content: &str,
    format: ManifestFormat,
    path: &Path,
) -> Result<Manifest, PlugdexError> {
    let value: Value = match format {
        ManifestFormat::Json => {
            serde_json::from_str(content).map_err(|e| PlugdexError::ManifestParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        }
        ManifestFormat::Yaml => {
            if is_blank_yaml(content) {
                return Ok(Manifest::new());
            }
            serde_yaml::from_str(content).map_err(|e| PlugdexError::ManifestParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
        }
    };

    match value {
        Value::Object(fields) => Ok(Manifest::from_map(fields)),
        Value::Null if format == ManifestFormat::Yaml => Ok(Manifest::new()),
        other => Err(PlugdexError::ManifestShape {
            path: path.to_path_buf(),
            message: format!("found {}", value_kind(&other)),
        }),
    }
}

/// Render a manifest in the given format.
///
/// Key order is preserved and non-ASCII characters are written literally.
pub fn render_manifest(manifest: &Manifest, format: ManifestFormat) -> Result<String, PlugdexError> {
    match format {
        ManifestFormat::Json => serde_json::to_string_pretty(manifest.as_map())
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| PlugdexError::Internal(format!("failed to encode JSON manifest: {e}"))),
        ManifestFormat::Yaml => serde_yaml::to_string(manifest.as_map())
            .map_err(|e| PlugdexError::Internal(format!("failed to encode YAML manifest: {e}"))),
    }
}

/// Load a manifest from disk, inferring the format from its extension.
pub fn load_manifest(path: &Path) -> Result<Manifest, PlugdexError> {
    let format = format_for(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| PlugdexError::io(path, e))?;
    parse_manifest(&content, format, path)
}

/// Write a manifest back to disk in the format implied by its extension.
pub fn save_manifest(path: &Path, manifest: &Manifest) -> Result<(), PlugdexError> {
    let format = format_for(path)?;
    let rendered = render_manifest(manifest, format)?;
    std::fs::write(path, rendered).map_err(|e| PlugdexError::io(path, e))
}

/// List manifest files directly inside `dir`, sorted by file name.
///
/// Fails with [`PlugdexError::MissingDirectory`] if `dir` does not exist.
pub fn list_manifest_files(dir: &Path) -> Result<Vec<PathBuf>, PlugdexError> {
    if !dir.is_dir() {
        return Err(PlugdexError::MissingDirectory {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| PlugdexError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PlugdexError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && ManifestFormat::from_path(&path).is_some() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn format_for(path: &Path) -> Result<ManifestFormat, PlugdexError> {
    ManifestFormat::from_path(path).ok_or_else(|| PlugdexError::ManifestParse {
        path: path.to_path_buf(),
        message: format!(
            "unrecognized extension (expected one of: {})",
            MANIFEST_EXTENSIONS.join(", ")
        ),
    })
}

fn is_blank_yaml(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
