// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The optional repository-wide `base.json`.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Key in `base.json` whose value is copied into the index as `mirrors`.
pub const MIRRORS_KEY: &str = "DownloadMirrors";

/// Load `base.json` as a JSON object.
///
/// An absent file, unreadable text, malformed JSON, or a top-level value that
/// is not an object all yield an empty mapping; only the last three warn.
pub fn load_base_config(path: &Path) -> Map<String, Value> {
    if !path.exists() {
        debug!(path = %path.display(), "no base config");
        return Map::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "base config unreadable, ignored");
            return Map::new();
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!(path = %path.display(), "base config is not an object, ignored");
            Map::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "base config parse failed, ignored");
            Map::new()
        }
    }
}

/// The `DownloadMirrors` value, if present and truthy.
pub fn mirrors(base: &Map<String, Value>) -> Option<&Value> {
    base.get(MIRRORS_KEY).filter(|v| is_truthy(v))
}

/// Null, false, zero, and empty strings, arrays and objects are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    fn write(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("base.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn absent_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_base_config(&dir.path().join("base.json")).is_empty());
    }

    #[test]
    #[traced_test]
    fn malformed_file_is_empty_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "{\"DownloadMirrors\": [");
        assert!(load_base_config(&path).is_empty());
        assert!(logs_contain("base config parse failed"));
    }

    #[test]
    fn non_object_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[\"https://mirror.test\"]");
        assert!(load_base_config(&path).is_empty());
    }

    #[test]
    fn object_is_loaded_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, r#"{"Title": "Plugins", "DownloadMirrors": ["https://a.test"]}"#);
        let base = load_base_config(&path);
        let keys: Vec<&String> = base.keys().collect();
        assert_eq!(keys, vec!["Title", "DownloadMirrors"]);
        assert_eq!(mirrors(&base), Some(&json!(["https://a.test"])));
    }

    #[test]
    fn falsy_mirrors_are_dropped() {
        for value in [json!(null), json!(false), json!(0), json!(""), json!([]), json!({})] {
            let mut base = Map::new();
            base.insert(MIRRORS_KEY.into(), value.clone());
            assert!(mirrors(&base).is_none(), "{value} should be falsy");
        }
        let mut base = Map::new();
        base.insert(MIRRORS_KEY.into(), json!({"cn": "https://mirror.test"}));
        assert!(mirrors(&base).is_some());
    }
}
