// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Registry of tracked root repositories.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::MultiResult;
use crate::utility::fs::{read_json, write_json_atomic};

/// A tracked root repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoEntry {
    pub path: String,
    pub name: String,
}

impl RepoEntry {
    /// Entry for `path`, named after its last `/` segment.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        Self {
            path: path.to_string(),
            name: entry_name(path).to_string(),
        }
    }
}

/// Last `/`-separated segment, or the whole path when that is empty.
fn entry_name(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => path,
    }
}

/// On-disk shape; `name` is only present when stored explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl From<StoredEntry> for RepoEntry {
    fn from(stored: StoredEntry) -> Self {
        match stored.name.filter(|n| !n.is_empty()) {
            Some(name) => Self {
                path: stored.path,
                name,
            },
            None => Self::from_path(&stored.path),
        }
    }
}

/// Ordered list of root repositories persisted at a movable location.
#[derive(Debug, Clone)]
pub struct Registry {
    path: PathBuf,
}

impl Registry {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Points the registry at another file; nothing is moved.
    pub fn set_path(&mut self, path: PathBuf) {
        self.path = path;
    }

    fn read(&self) -> Option<Vec<StoredEntry>> {
        read_json(&self.path)
    }

    /// Entries in stored order; empty when the file is missing or malformed.
    #[must_use]
    pub fn list(&self) -> Vec<RepoEntry> {
        self.read()
            .unwrap_or_default()
            .into_iter()
            .map(RepoEntry::from)
            .collect()
    }

    /// Appends `repo_path` unless already present. Returns whether it was added.
    ///
    /// A malformed file is replaced by a list holding only the new entry.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the file cannot be written.
    pub fn add(&self, repo_path: &str) -> MultiResult<bool> {
        let mut entries = self.read().unwrap_or_default();
        if entries.iter().any(|e| e.path == repo_path) {
            debug!(path = repo_path, "already registered");
            return Ok(false);
        }
        entries.push(StoredEntry {
            path: repo_path.to_string(),
            name: None,
        });
        write_json_atomic(&self.path, &entries)?;
        Ok(true)
    }

    /// Removes `repo_path`. Returns whether an entry was removed.
    ///
    /// A missing or malformed file is left untouched.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the file cannot be written.
    pub fn remove(&self, repo_path: &str) -> MultiResult<bool> {
        let Some(entries) = self.read() else {
            return Ok(false);
        };
        let before = entries.len();
        let kept: Vec<StoredEntry> = entries
            .into_iter()
            .filter(|e| e.path != repo_path)
            .collect();
        write_json_atomic(&self.path, &kept)?;
        Ok(kept.len() != before)
    }
}
