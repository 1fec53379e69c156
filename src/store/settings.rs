// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local application settings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::MultiResult;
use crate::utility::fs::{read_json_or_default, write_json_atomic};

/// Flat settings object. Keys this crate does not know are kept on write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(
        rename = "openAIApiKey",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub open_ai_api_key: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AppSettings {
    /// The stored API key, trimmed; `None` when unset or blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.open_ai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Key-value store over one JSON file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current settings; empty when the file is missing or malformed.
    #[must_use]
    pub fn get(&self) -> AppSettings {
        read_json_or_default(&self.path)
    }

    /// # Errors
    ///
    /// Returns a `StoreError` if the file cannot be written.
    pub fn set(&self, settings: &AppSettings) -> MultiResult<()> {
        write_json_atomic(&self.path, settings)
    }

    /// Stores `key` trimmed; a blank key is stored as `""`.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the file cannot be written.
    pub fn set_api_key(&self, key: &str) -> MultiResult<()> {
        let mut settings = self.get();
        settings.open_ai_api_key = Some(key.trim().to_string());
        self.set(&settings)
    }
}
