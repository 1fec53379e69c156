// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file(req)
//!   .add_toml_file_optional(opt)
//!   .add_toml_str()
//!   .with_env_prefix("MULTI")
//!   .apply_overrides(["git/read_timeout_secs=60"])
//!        |
//!        v
//!    build() --> Config (validated)
//! ```

use anyhow::Context;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Environment, File, FileFormat};
use std::fmt;
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{ConfigError, Result};

/// Splits `section/key=value` (or `section.key=value`) into a dotted key and
/// its value.
///
/// # Errors
///
/// Returns `ConfigError::ParseError` if the `=` or the section is missing.
pub fn parse_override(input: &str) -> std::result::Result<(String, String), ConfigError> {
    let parse_err = |message: &str| ConfigError::ParseError {
        input: input.to_string(),
        message: message.to_string(),
    };

    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| parse_err("expected KEY=VALUE"))?;
    let key = key.trim().replace('/', ".");
    match key.split_once('.') {
        Some((section, name)) if !section.is_empty() && !name.is_empty() => {
            Ok((key.clone(), value.trim().to_string()))
        }
        _ => Err(parse_err("expected a key of the form section/key")),
    }
}

/// One layer fed to the loader, in the order it was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// An optional file that existed when it was added.
    OptionalFile(PathBuf),
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "[file] {}", path.display()),
            Self::OptionalFile(path) => write!(f, "[optional] {}", path.display()),
            Self::Inline => f.write_str("[string] <string>"),
        }
    }
}

/// Layers TOML files, inline TOML, `MULTI_*` variables and overrides.
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        if required {
            self.sources.push(ConfigSource::File(path.to_path_buf()));
        } else if path.exists() {
            self.sources.push(ConfigSource::OptionalFile(path.to_path_buf()));
        }
        self
    }

    /// Adds a TOML file that must exist when `build()` runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), true)
    }

    /// Adds a TOML file that is skipped when absent.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), false)
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Reads `PREFIX_SECTION__KEY` variables, e.g. `MULTI_GIT__READ_TIMEOUT_SECS`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets one dotted key, above every file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be expressed as a config path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .with_context(|| format!("cannot override '{key}'"))?;
        Ok(self)
    }

    /// Applies `section/key=value` overrides in order.
    ///
    /// # Errors
    ///
    /// Returns an error for the first override that does not parse.
    pub fn apply_overrides<S: AsRef<str>>(self, overrides: &[S]) -> Result<Self> {
        overrides.iter().try_fold(self, |loader, raw| {
            let (key, value) = parse_override(raw.as_ref())?;
            loader.set(&key, value)
        })
    }

    /// Merges every layer and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing required file, invalid TOML, an
    /// unparseable variable, an unknown or mistyped key, or a value that
    /// fails [`Config::validate`].
    pub fn build(self) -> Result<Config> {
        let mut builder = self.builder;
        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }
        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Numbered source lines for display, e.g. `1. [file] multi.toml`.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
