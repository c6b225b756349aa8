// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Package metadata source trait.

use async_trait::async_trait;

use crate::error::PlugdexError;
use crate::types::PackageMetadata;

/// A source of published package metadata, usually an HTTP package registry.
///
/// Implementations must report a confirmed-absent package as
/// [`PlugdexError::PackageNotFound`] so callers can tell it apart from
/// transient or transport failures.
#[async_trait]
pub trait PackageSource: Send + Sync {
    /// Fetch the metadata document for `package` from the registry at `registry`.
    async fn fetch_package(
        &self,
        registry: &str,
        package: &str,
    ) -> Result<PackageMetadata, PlugdexError>;
}
