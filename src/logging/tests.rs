// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};
use crate::config::types::GlobalConfig;
use std::path::Path;

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(6).is_ok());
    assert!(LogLevel::new(7).is_err());
    assert_eq!(LogLevel::from_u8(9), None);
    assert_eq!(LogLevel::try_from(4).map(u8::from).ok(), Some(4));
}

#[test]
fn test_log_level_filters_keep_dependencies_quiet() {
    let filters: Vec<_> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(|level| format!("{} {level} => {}", level.as_u8(), level.directives()))
        .collect();
    insta::assert_snapshot!(filters.join("\n"), @r"
    0 off => off
    1 error => error
    2 warn => warn
    3 info => warn,multi_rs=info,multi=info
    4 debug => warn,multi_rs=debug,multi=debug
    5 trace => warn,multi_rs=trace,multi=trace
    6 dump => trace
    ");
}

#[test]
fn test_log_level_serde_roundtrip_rejects_out_of_range() {
    let level: LogLevel = serde_json::from_str("5").unwrap();
    assert_eq!(level, LogLevel::TRACE);
    assert!(serde_json::from_str::<LogLevel>("42").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::INFO);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert!(config.log_file().is_none());
    assert!(!config.json_file());
    assert!(!config.show_target());
}

#[test]
fn test_log_config_from_global_config() {
    let global = GlobalConfig {
        output_log_level: LogLevel::WARN,
        file_log_level: LogLevel::DEBUG,
        log_file: Some("/var/log/multi.log".into()),
    };
    let config = LogConfig::from(&global);

    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert_eq!(config.log_file(), Some(Path::new("/var/log/multi.log")));
    assert!(LogLevel::DEBUG > LogLevel::INFO);
}
