// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the plugdex pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type shared by the updater, the index generator, and the
/// registry client.
#[derive(Debug, Error)]
pub enum PlugdexError {
    /// A filesystem operation failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A required directory does not exist.
    #[error("directory not found: {}", path.display())]
    MissingDirectory { path: PathBuf },

    /// A manifest could not be parsed in its declared format.
    #[error("failed to parse {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    /// A manifest parsed but is not a key-value mapping.
    #[error("{} is not a mapping: {message}", path.display())]
    ManifestShape { path: PathBuf, message: String },

    /// The registry reported that the package does not exist (HTTP 404).
    #[error("package {package} not found")]
    PackageNotFound { package: String },

    /// Any other registry failure (transport, timeout, non-2xx, bad body).
    #[error("registry error: {message}")]
    Registry {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PlugdexError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlugdexError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true when the registry confirmed the package is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PlugdexError::PackageNotFound { .. })
    }
}
