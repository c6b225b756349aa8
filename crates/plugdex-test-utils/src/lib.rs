// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for plugdex integration tests.
//!
//! # Components
//!
//! - [`MockRegistry`] - In-memory package source with canned metadata
//! - [`PluginRepo`] - Temporary repository laid out like a real plugin index

pub mod fixtures;
pub mod mock_registry;

pub use fixtures::PluginRepo;
pub use mock_registry::MockRegistry;
