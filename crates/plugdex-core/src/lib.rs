// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the plugdex pipeline.
//!
//! Provides the shared error type, the manifest document model with its
//! YAML/JSON codec, registry metadata types, and the [`PackageSource`] trait
//! the updater fetches through.

pub mod error;
pub mod manifest;
pub mod source;
pub mod types;

pub use error::PlugdexError;
pub use manifest::{
    list_manifest_files, load_manifest, parse_manifest, render_manifest, save_manifest, Manifest,
    ManifestFormat, SOURCE_KEY,
};
pub use source::PackageSource;
pub use types::{DistRecord, PackageMetadata, VersionMetadata, VersionRecord};
