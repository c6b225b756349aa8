// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The published index document.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use plugdex_core::{Manifest, PlugdexError};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::base::mirrors;

/// Version of the index document layout.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Top-level shape of `index.json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexPayload {
    pub schema_version: String,
    pub generated_at: String,
    pub plugins: Vec<Manifest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirrors: Option<Value>,
}

/// Assemble the index from collected manifests and the base config.
///
/// `now` is the generation timestamp, rendered as RFC 3339 in UTC with
/// microseconds and a `+00:00` offset.
pub fn build_payload(
    plugins: Vec<Manifest>,
    base: &Map<String, Value>,
    now: DateTime<Utc>,
) -> IndexPayload {
    IndexPayload {
        schema_version: SCHEMA_VERSION.to_string(),
        generated_at: now.to_rfc3339_opts(SecondsFormat::Micros, false),
        plugins,
        mirrors: mirrors(base).cloned(),
    }
}

/// Render the payload as two-space indented JSON without a trailing newline.
pub fn render_payload(payload: &IndexPayload) -> Result<String, PlugdexError> {
    serde_json::to_string_pretty(payload)
        .map_err(|e| PlugdexError::Internal(format!("failed to encode index: {e}")))
}

/// Write the payload to `output`, creating parent directories as needed.
pub fn write_output(output: &Path, payload: &IndexPayload) -> Result<(), PlugdexError> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| PlugdexError::io(parent, e))?;
    }
    let rendered = render_payload(payload)?;
    std::fs::write(output, rendered).map_err(|e| PlugdexError::io(output, e))
}
