// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::paths::{default_registry_path, default_settings_path};
use super::{Config, ConfigLoader, ConfigSource, parse_override};
use crate::logging::LogLevel;
use std::path::PathBuf;

fn pinned_paths() -> &'static str {
    r#"
[global]
log_file = "/data/multi.log"

[paths]
registry = "/data/repos.json"
settings = "/data/settings.json"
"#
}

#[test]
fn test_default_config() {
    let config = Config::default();
    insta::assert_yaml_snapshot!(
        serde_json::json!({
            "global.output_log_level": config.global.output_log_level.as_u8(),
            "global.file_log_level": config.global.file_log_level.as_u8(),
            "paths.manifest": config.paths.manifest,
            "git.status_timeout_secs": config.git.status_timeout_secs,
            "git.network_timeout_secs": config.git.network_timeout_secs,
            "git.history_window_secs": config.git.history_window_secs,
            "ai.model": config.ai.model,
            "ai.max_diff_chars": config.ai.max_diff_chars,
        }),
        @r#"
    ai.max_diff_chars: 18000
    ai.model: gpt-4o-mini
    git.history_window_secs: 60
    git.network_timeout_secs: 120
    git.status_timeout_secs: 10
    global.file_log_level: 5
    global.output_log_level: 3
    paths.manifest: multi.json
    "#
    );
}

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(6).is_ok());
    assert!(LogLevel::new(7).is_err());
}

#[test]
fn test_config_parse() {
    let config = Config::parse(
        r#"
[global]
output_log_level = 4
log_file = "/tmp/multi.log"

[git]
read_timeout_secs = 45
history_window_secs = 120

[ai]
model = "gpt-4o"
temperature = 0.7
"#,
    )
    .unwrap();

    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.global.log_file, Some(PathBuf::from("/tmp/multi.log")));
    assert_eq!(config.git.read_timeout_secs, 45);
    assert_eq!(config.git.history_window_secs, 120);
    assert_eq!(config.git.status_timeout_secs, 10);
    assert_eq!(config.ai.model, "gpt-4o");
    assert!((config.ai.temperature - 0.7).abs() < f32::EPSILON);
}

#[test]
fn test_deny_unknown_fields() {
    let top = Config::parse("[nope]\nkey = 1").unwrap_err().to_string();
    let nested = Config::parse("[git]\ntimeout = 1").unwrap_err().to_string();

    assert!(top.contains("nope"), "{top}");
    assert!(nested.contains("timeout"), "{nested}");
}

#[test]
fn test_validate_rejects_out_of_range() {
    let cases = [
        "[git]\nstatus_timeout_secs = 0",
        "[git]\nhistory_max_commits = 0",
        "[ai]\ntemperature = 2.5",
        "[ai]\nmax_diff_chars = 0",
        "[paths]\nmanifest = \"\"",
    ];
    let messages: Vec<String> = cases
        .iter()
        .map(|toml| Config::parse(toml).unwrap_err().to_string())
        .collect();

    insta::assert_snapshot!(messages.join("\n"), @r"
    invalid value for 'status_timeout_secs' in section '[git]': timeout must be at least 1 second
    invalid value for 'history_max_commits' in section '[git]': must be positive
    invalid value for 'temperature' in section '[ai]': must be within 0-2, got 2.5
    invalid value for 'max_diff_chars' in section '[ai]': must be positive
    invalid value for 'manifest' in section '[paths]': must not be empty
    ");
}

#[test]
fn test_resolve_and_validate_fills_store_paths() {
    let mut config = Config::parse("[paths]\nregistry = \"/data/repos.json\"").unwrap();
    config.resolve_and_validate().unwrap();

    assert_eq!(config.paths.registry, Some(PathBuf::from("/data/repos.json")));
    assert!(config.paths.settings.is_some());
}

#[test]
fn test_default_store_paths() {
    let home = tempfile::tempdir().unwrap();

    assert_eq!(
        default_registry_path(home.path()),
        home.path().join(".multi").join("repos.json")
    );
    assert_eq!(
        default_settings_path(home.path()),
        home.path().join(".multi").join("settings.json")
    );

    let shared = home.path().join(".openbase").join("coder-projects.json");
    std::fs::create_dir_all(shared.parent().unwrap()).unwrap();
    std::fs::write(&shared, "[]").unwrap();
    assert_eq!(default_registry_path(home.path()), shared);
}

#[test]
fn test_format_options() {
    let config = Config::parse(pinned_paths()).unwrap();

    insta::assert_snapshot!(config.format_options().join("\n"), @r"
    ai.endpoint              = https://api.openai.com/v1/chat/completions
    ai.max_diff_chars        = 18000
    ai.max_message_chars     = 120
    ai.max_tokens            = 120
    ai.model                 = gpt-4o-mini
    ai.temperature           = 0.2
    git.history_max_commits  = 250
    git.history_window_secs  = 60
    git.network_timeout_secs = 120
    git.read_timeout_secs    = 30
    git.status_timeout_secs  = 10
    global.file_log_level    = 5
    global.log_file          = /data/multi.log
    global.output_log_level  = 3
    paths.manifest           = multi.json
    paths.registry           = /data/repos.json
    paths.settings           = /data/settings.json
    ");
}

#[test]
fn test_parse_override() {
    let parsed: Vec<String> = [
        "git/read_timeout_secs=60",
        "ai.model = gpt-4o",
        "global/log_file=/tmp/a=b.log",
        "no_equals",
        "model=gpt",
        "/model=gpt",
    ]
    .iter()
    .map(|raw| match parse_override(raw) {
        Ok((key, value)) => format!("{key} -> {value}"),
        Err(e) => e.to_string(),
    })
    .collect();

    insta::assert_snapshot!(parsed.join("\n"), @r"
    git.read_timeout_secs -> 60
    ai.model -> gpt-4o
    global.log_file -> /tmp/a=b.log
    failed to parse config override 'no_equals': expected KEY=VALUE
    failed to parse config override 'model=gpt': expected a key of the form section/key
    failed to parse config override '/model=gpt': expected a key of the form section/key
    ");
}

#[test]
fn test_apply_overrides_win_over_files() {
    let config = ConfigLoader::new()
        .add_toml_str("[git]\nread_timeout_secs = 45")
        .apply_overrides(&["git/read_timeout_secs=90", "global/output_log_level=4"])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.git.read_timeout_secs, 90);
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
}

#[test]
fn test_apply_overrides_rejects_malformed() {
    let result = ConfigLoader::new().apply_overrides(&["oops"]);
    assert!(result.is_err());
}

#[test]
fn test_config_loader_tracks_files() {
    let loader = ConfigLoader::new()
        .add_toml_str("[git]\nread_timeout_secs = 45")
        .add_toml_file_optional("/nonexistent/optional.toml")
        .add_toml_str("[ai]\nmodel = \"x\"");

    insta::assert_snapshot!(loader.format_loaded_files().join("\n"), @r"
    1. [string] <string>
    2. [string] <string>
    ");
}

#[test]
fn test_config_loader_source_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("multi.toml");
    std::fs::write(&present, "").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file_optional(&present)
        .add_toml_file("/etc/multi/site.toml");

    assert_eq!(
        loader.sources(),
        [
            ConfigSource::OptionalFile(present),
            ConfigSource::File(PathBuf::from("/etc/multi/site.toml")),
        ]
    );
    assert_eq!(
        ConfigSource::File(PathBuf::from("/etc/multi/site.toml")).to_string(),
        "[file] /etc/multi/site.toml"
    );
}

#[test]
fn test_config_loader_add_toml_file() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(file, "[git]\nnetwork_timeout_secs = 300").expect("failed to write temp file");

    let config = Config::from_file(file.path()).expect("build should succeed");
    assert_eq!(config.git.network_timeout_secs, 300);

    let missing = ConfigLoader::new()
        .add_toml_file("/nonexistent/path/to/config.toml")
        .build();
    assert!(missing.is_err());
}

#[test]
fn test_config_loader_invalid_toml() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().expect("failed to create temp file");
    writeln!(file, "this is not valid toml {{{{{{").expect("failed to write");

    assert!(ConfigLoader::new().add_toml_file(file.path()).build().is_err());
}

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: the variable name is unique to this test.
    unsafe {
        std::env::set_var("MULTICFGTEST_GIT__READ_TIMEOUT_SECS", "75");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[git]\nread_timeout_secs = 45")
        .with_env_prefix("MULTICFGTEST")
        .build()
        .expect("build should succeed");

    // SAFETY: same as above
    unsafe {
        std::env::remove_var("MULTICFGTEST_GIT__READ_TIMEOUT_SECS");
    }

    assert_eq!(config.git.read_timeout_secs, 75);
}

#[test]
fn test_config_loader_type_mismatch() {
    let err = ConfigLoader::new()
        .add_toml_str("[git]\nread_timeout_secs = \"soon\"")
        .build()
        .unwrap_err()
        .to_string();

    assert!(
        err.contains("read_timeout_secs") || err.contains("invalid"),
        "{err}"
    );
}
