// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock package registry for deterministic testing.
//!
//! `MockRegistry` implements `PackageSource` from an in-memory table, so the
//! updater can be exercised without an HTTP server. Packages that were never
//! registered answer as not found.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use plugdex_core::{PackageMetadata, PackageSource, PlugdexError};
use serde_json::Value;

#[derive(Debug, Clone)]
enum Canned {
    Metadata(Value),
    Failure(String),
}

/// An in-memory package source that records every lookup.
#[derive(Debug, Clone, Default)]
pub struct MockRegistry {
    packages: HashMap<String, Canned>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockRegistry {
    /// Create a registry that knows no packages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `metadata` (a registry document) for `package`.
    pub fn with_package(mut self, package: &str, metadata: Value) -> Self {
        self.packages
            .insert(package.to_string(), Canned::Metadata(metadata));
        self
    }

    /// Fail lookups of `package` with a non-404 registry error.
    pub fn with_failure(mut self, package: &str, message: &str) -> Self {
        self.packages
            .insert(package.to_string(), Canned::Failure(message.to_string()));
        self
    }

    /// Every `(registry, package)` pair requested so far, in order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PackageSource for MockRegistry {
    async fn fetch_package(
        &self,
        registry: &str,
        package: &str,
    ) -> Result<PackageMetadata, PlugdexError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((registry.to_string(), package.to_string()));
        }

        match self.packages.get(package) {
            Some(Canned::Metadata(body)) => {
                serde_json::from_value(body.clone()).map_err(|e| PlugdexError::Registry {
                    message: format!("malformed metadata for {package}: {e}"),
                    source: Some(Box::new(e)),
                })
            }
            Some(Canned::Failure(message)) => Err(PlugdexError::Registry {
                message: message.clone(),
                source: None,
            }),
            None => Err(PlugdexError::PackageNotFound {
                package: package.to_string(),
            }),
        }
    }
}
