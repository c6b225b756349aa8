// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plugdex generate` command implementation.

use chrono::Utc;
use plugdex_config::PlugdexConfig;
use plugdex_core::PlugdexError;
use plugdex_index::{generate_index, IndexSummary};

/// Write the aggregate index stamped with the current time.
pub fn run_generate(config: &PlugdexConfig) -> Result<IndexSummary, PlugdexError> {
    generate_index(&config.paths.resolve(), Utc::now())
}
