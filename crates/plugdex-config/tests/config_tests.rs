// SPDX-FileCopyrightText: 2026 Plugdex Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the plugdex configuration system.

use plugdex_config::diagnostic::ConfigError;
use plugdex_config::model::{PlugdexConfig, VersionOrderingMode};
use plugdex_config::{load_and_validate, load_and_validate_str, load_config, load_config_from_str};

/// A file setting every section deserializes into the model.
#[test]
fn full_toml_deserializes() {
    let toml = r#"
[paths]
root = "/srv/plugin-index"
plugins_dir = "manifests"
base_config = "config/base.json"
output = "public/index.json"

[registry]
default_url = "https://registry.npmmirror.com"
timeout_secs = 5
version_ordering = "lexical"

[updater]
auto_remove_invalid = true

[logging]
log_level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.paths.root, "/srv/plugin-index");
    assert_eq!(config.paths.plugins_dir, "manifests");
    assert_eq!(config.paths.base_config, "config/base.json");
    assert_eq!(config.paths.output, "public/index.json");
    assert_eq!(config.registry.default_url, "https://registry.npmmirror.com");
    assert_eq!(config.registry.timeout_secs, 5);
    assert_eq!(config.registry.version_ordering, VersionOrderingMode::Lexical);
    assert!(config.updater.auto_remove_invalid);
    assert_eq!(config.logging.log_level, "debug");
}

/// An empty file yields the repository's default layout.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.paths.root, ".");
    assert_eq!(config.paths.plugins_dir, "index/plugins");
    assert_eq!(config.paths.base_config, "base.json");
    assert_eq!(config.paths.output, "index/index.json");
    assert_eq!(config.registry.default_url, "https://registry.npmjs.org");
    assert_eq!(config.registry.timeout_secs, 10);
    assert_eq!(config.registry.version_ordering, VersionOrderingMode::Semver);
    assert!(!config.updater.auto_remove_invalid);
    assert_eq!(config.logging.log_level, "info");
}

/// Runs `f` with a private working directory and an empty user config dir.
fn with_jail<F>(f: F)
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<()>,
{
    figment::Jail::expect_with(|jail| {
        let dir = jail.directory().to_path_buf();
        jail.set_env("XDG_CONFIG_HOME", dir.display());
        f(jail)
    });
}

/// `PLUGDEX_SECTION_KEY` variables override the local `plugdex.toml`.
#[test]
fn namespaced_env_overrides_toml() {
    with_jail(|jail| {
        jail.create_file(
            "plugdex.toml",
            "[updater]\nauto_remove_invalid = false\n\n[logging]\nlog_level = \"warn\"\n",
        )?;
        jail.set_env("PLUGDEX_UPDATER_AUTO_REMOVE_INVALID", "true");
        jail.set_env("PLUGDEX_LOGGING_LOG_LEVEL", "debug");
        jail.set_env("PLUGDEX_REGISTRY_TIMEOUT_SECS", "5");

        let config = load_config()?;
        assert!(config.updater.auto_remove_invalid);
        assert_eq!(config.logging.log_level, "debug");
        assert_eq!(config.registry.timeout_secs, 5);
        Ok(())
    });
}

/// The legacy flag accepts `yes` in any case.
#[test]
fn legacy_env_flag_enables_auto_remove() {
    with_jail(|jail| {
        jail.set_env("AUTO_REMOVE_INVALID", "YES");
        let config = load_config()?;
        assert!(config.updater.auto_remove_invalid);
        Ok(())
    });
}

/// With both variables set, the namespaced one wins.
#[test]
fn namespaced_env_beats_legacy_flag() {
    with_jail(|jail| {
        jail.set_env("AUTO_REMOVE_INVALID", "yes");
        jail.set_env("PLUGDEX_UPDATER_AUTO_REMOVE_INVALID", "false");
        let config = load_config()?;
        assert!(!config.updater.auto_remove_invalid);
        Ok(())
    });
}

/// The legacy flag still overrides the TOML file.
#[test]
fn legacy_env_flag_beats_toml() {
    with_jail(|jail| {
        jail.create_file("plugdex.toml", "[updater]\nauto_remove_invalid = false\n")?;
        jail.set_env("AUTO_REMOVE_INVALID", "1");
        let config = load_config()?;
        assert!(config.updater.auto_remove_invalid);
        Ok(())
    });
}

/// Missing config files are skipped by Figment's `Toml::file()`.
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: PlugdexConfig = Figment::new()
        .merge(Serialized::defaults(PlugdexConfig::default()))
        .merge(Toml::file("/nonexistent/path/plugdex.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.paths.plugins_dir, "index/plugins");
}

/// An explicit `--config` path that does not exist is an error, not defaults.
#[test]
fn explicit_missing_config_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let errors = load_and_validate(Some(&dir.path().join("nope.toml")))
        .expect_err("missing explicit file should fail");
    assert!(matches!(&errors[0], ConfigError::Other(msg) if msg.contains("config file not found")));
}

/// Misspelled key produces an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_key_suggests_correction() {
    let toml = r#"
[registry]
timout_secs = 3
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "timout_secs"
                && suggestion.as_deref() == Some("timeout_secs")
                && valid_keys.contains("default_url")
        })
    });
    assert!(found, "expected UnknownKey for timout_secs, got: {errors:?}");
}

/// Unexpected top-level section is rejected.
#[test]
fn unknown_top_level_section_rejected() {
    let err = load_config_from_str("[metrics]\nenabled = true\n")
        .expect_err("unknown section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("metrics"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Unsupported ordering mode is an InvalidValue diagnostic.
#[test]
fn unknown_version_ordering_rejected() {
    let errors = load_and_validate_str("[registry]\nversion_ordering = \"newest\"\n")
        .expect_err("unknown variant should fail");
    assert!(
        errors.iter().any(|e| matches!(e, ConfigError::InvalidValue { .. })),
        "got: {errors:?}"
    );
}

/// A string where a number belongs is reported as a type error.
#[test]
fn invalid_type_reported() {
    let errors = load_and_validate_str("[registry]\ntimeout_secs = \"ten\"\n")
        .expect_err("string timeout should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("timeout_secs"))),
        "got: {errors:?}"
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_runs_after_parse() {
    let errors = load_and_validate_str("[registry]\ndefault_url = \"registry.local\"\n")
        .expect_err("scheme-less URL should fail validation");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("default_url"))
    ));
}

/// Diagnostics render through miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "plugin_dir".to_string(),
        suggestion: Some("plugins_dir".to_string()),
        valid_keys: "root, plugins_dir, base_config, output".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some());
    let help = error.help().expect("should have help text").to_string();
    assert!(help.contains("did you mean `plugins_dir`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("plugin_dir"));
}
