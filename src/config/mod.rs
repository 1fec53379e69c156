// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for multi-rs.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. multi.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. MULTI_* env vars
//! 5. CLI overrides (--set, --log-level, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! MULTI_GLOBAL__OUTPUT_LOG_LEVEL=4   → global.output_log_level = 4
//! MULTI_GIT__READ_TIMEOUT_SECS=60    → git.read_timeout_secs = 60
//! MULTI_AI__MODEL=gpt-4o             → ai.model = "gpt-4o"
//! ```
//!
//! The API key is not configuration; it lives in the settings store.

pub mod loader;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

pub use loader::{ConfigLoader, ConfigSource, parse_override};
use paths::PathsConfig;
use types::{AiConfig, GitConfig, GlobalConfig};

/// Local configuration file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "multi.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "MULTI";

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Store and manifest locations.
    pub paths: PathsConfig,
    /// Git engine tunables.
    pub git: GitConfig,
    /// Commit message generation.
    pub ai: AiConfig,
}

fn invalid(section: &str, key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.into(),
    }
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use multi_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("multi.toml")
    ///     .with_env_prefix("MULTI")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Checks value ranges the types cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending key.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let timeouts = [
            ("status_timeout_secs", self.git.status_timeout_secs),
            ("read_timeout_secs", self.git.read_timeout_secs),
            ("network_timeout_secs", self.git.network_timeout_secs),
        ];
        if let Some((key, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
            return Err(invalid("git", key, "timeout must be at least 1 second"));
        }
        if self.git.history_max_commits == 0 {
            return Err(invalid("git", "history_max_commits", "must be positive"));
        }
        if self.paths.manifest.trim().is_empty() {
            return Err(invalid("paths", "manifest", "must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.ai.temperature) {
            return Err(invalid(
                "ai",
                "temperature",
                format!("must be within 0-2, got {}", self.ai.temperature),
            ));
        }
        if self.ai.max_diff_chars == 0 {
            return Err(invalid("ai", "max_diff_chars", "must be positive"));
        }
        if self.ai.max_message_chars == 0 {
            return Err(invalid("ai", "max_message_chars", "must be positive"));
        }
        if self.ai.endpoint.trim().is_empty() {
            return Err(invalid("ai", "endpoint", "must not be empty"));
        }
        Ok(())
    }

    /// Fill in default store locations and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        if self.paths.registry.is_none() {
            self.paths.registry = Some(self.paths.registry_path());
        }
        if self.paths.settings.is_none() {
            self.paths.settings = Some(self.paths.settings_path());
        }
        self.validate()?;
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// One aligned `key = value` line per option, ordered by key. Unset
    /// paths show the location that would be used.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_git_options(&mut options);
        self.format_ai_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "paths.registry".into(),
            self.paths.registry_path().display().to_string(),
        );
        options.insert(
            "paths.settings".into(),
            self.paths.settings_path().display().to_string(),
        );
        options.insert("paths.manifest".into(), self.paths.manifest.clone());
    }

    fn format_git_options(&self, options: &mut BTreeMap<String, String>) {
        let git = &self.git;
        for (key, value) in [
            ("status_timeout_secs", git.status_timeout_secs.to_string()),
            ("read_timeout_secs", git.read_timeout_secs.to_string()),
            ("network_timeout_secs", git.network_timeout_secs.to_string()),
            ("history_max_commits", git.history_max_commits.to_string()),
            ("history_window_secs", git.history_window_secs.to_string()),
        ] {
            options.insert(format!("git.{key}"), value);
        }
    }

    fn format_ai_options(&self, options: &mut BTreeMap<String, String>) {
        let ai = &self.ai;
        options.insert("ai.endpoint".into(), ai.endpoint.clone());
        options.insert("ai.model".into(), ai.model.clone());
        options.insert("ai.temperature".into(), ai.temperature.to_string());
        options.insert("ai.max_tokens".into(), ai.max_tokens.to_string());
        options.insert("ai.max_diff_chars".into(), ai.max_diff_chars.to_string());
        options.insert(
            "ai.max_message_chars".into(),
            ai.max_message_chars.to_string(),
        );
    }
}
