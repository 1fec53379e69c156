// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! Config
//!   global  log levels, log file
//!   paths   registry, settings, manifest     (paths.rs)
//!   git     timeouts, history bounds
//!   ai      completion endpoint and limits
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Global options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Git engine tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// `status` and ahead/behind queries.
    pub status_timeout_secs: u64,
    /// Diff, log, show, apply and commit.
    pub read_timeout_secs: u64,
    /// Pull, push and remote creation.
    pub network_timeout_secs: u64,
    /// Commits read per repository for history.
    pub history_max_commits: usize,
    /// Maximum gap between adjacent commits of a history group.
    pub history_window_secs: u64,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            status_timeout_secs: 10,
            read_timeout_secs: 30,
            network_timeout_secs: 120,
            history_max_commits: 250,
            history_window_secs: 60,
        }
    }
}

/// Commit message generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AiConfig {
    /// Chat completions endpoint.
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Diff characters sent before truncation.
    pub max_diff_chars: usize,
    /// Characters kept of the generated line.
    pub max_message_chars: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 120,
            max_diff_chars: 18_000,
            max_message_chars: 120,
        }
    }
}
