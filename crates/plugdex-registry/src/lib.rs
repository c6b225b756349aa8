// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Package registry access for plugdex.
//!
//! - [`HttpRegistry`]: fetches package metadata documents over HTTP
//! - [`select_version`]: picks the version to publish, using an injected [`VersionOrdering`]
//! - [`build_version_record`]: normalizes a published version into a manifest record

pub mod client;
pub mod record;
pub mod version;

pub use client::{package_url, HttpRegistry};
pub use record::build_version_record;
pub use version::{select_version, SelectedVersion, SelectionReason, VersionOrdering};
