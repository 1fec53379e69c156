// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Store locations.
//!
//! ```text
//! ~/.multi/
//!   repos.json      registry (unless ~/.openbase/coder-projects.json exists)
//!   settings.json   settings
//! <root>/multi.json workspace manifest
//! ```
//!
//! Explicit paths win; the defaults are resolved against the home directory
//! at lookup time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::git::MANIFEST_FILE;

const DATA_DIR: &str = ".multi";
const REGISTRY_FILE: &str = "repos.json";
const SETTINGS_FILE: &str = "settings.json";
/// Registry shared with the desktop app, preferred when present.
const SHARED_REGISTRY: [&str; 2] = [".openbase", "coder-projects.json"];

/// Store and manifest locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Repository registry file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<PathBuf>,
    /// Settings file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<PathBuf>,
    /// Workspace manifest name, looked up at each registered root.
    pub manifest: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            registry: None,
            settings: None,
            manifest: MANIFEST_FILE.to_string(),
        }
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Default registry under `home`: the shared registry if it exists, else
/// `~/.multi/repos.json`.
#[must_use]
pub fn default_registry_path(home: &Path) -> PathBuf {
    let shared = SHARED_REGISTRY.iter().fold(home.to_path_buf(), |p, s| p.join(s));
    if shared.exists() {
        shared
    } else {
        home.join(DATA_DIR).join(REGISTRY_FILE)
    }
}

/// Default settings file under `home`.
#[must_use]
pub fn default_settings_path(home: &Path) -> PathBuf {
    home.join(DATA_DIR).join(SETTINGS_FILE)
}

impl PathsConfig {
    /// Configured registry path, or the default.
    #[must_use]
    pub fn registry_path(&self) -> PathBuf {
        self.registry
            .clone()
            .unwrap_or_else(|| default_registry_path(&home_dir()))
    }

    /// Configured settings path, or the default.
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.settings
            .clone()
            .unwrap_or_else(|| default_settings_path(&home_dir()))
    }
}
