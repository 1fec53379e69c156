// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Workspace manifest discovery.
//!
//! ```text
//! root/multi.json
//!   { "repos": [ { "name": "lib" }, { "url": "git@host:org/app.git" } ] }
//!        |
//!        v
//!   [ SubRepo { name: "app", path: root/app },
//!     SubRepo { name: "lib", path: root/lib } ]   (sorted by name)
//! ```
//!
//! `None` means "no manifest" (absent or malformed). `Some(vec![])` means a
//! manifest that declares nothing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{CommandRunner, GitEngine};

/// A sub-repository declared by a workspace manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubRepo {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    repos: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: Option<String>,
    url: Option<String>,
}

impl ManifestEntry {
    fn resolved_name(&self) -> Option<String> {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return Some(name.to_string());
        }
        self.url.as_deref().and_then(name_from_url)
    }
}

/// Derives a repository name from a clone URL: last `/` segment, `.git` stripped.
#[must_use]
pub fn name_from_url(url: &str) -> Option<String> {
    let stem = url.strip_suffix(".git").unwrap_or(url);
    stem.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
}

/// Reads `root/<manifest>` and lists its sub-repositories sorted by name.
///
/// Entries with neither a usable name nor a URL are skipped.
#[must_use]
pub fn discover_sub_repos(root: &Path, manifest: &str) -> Option<Vec<SubRepo>> {
    let manifest_path = root.join(manifest);
    let text = std::fs::read_to_string(&manifest_path).ok()?;
    let parsed: Manifest = match serde_json::from_str(&text) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(manifest = %manifest_path.display(), error = %e, "ignoring malformed manifest");
            return None;
        }
    };

    let mut repos: Vec<SubRepo> = parsed
        .repos
        .iter()
        .filter_map(ManifestEntry::resolved_name)
        .map(|name| SubRepo {
            path: root.join(&name),
            name,
        })
        .collect();
    repos.sort_by(|a, b| a.name.cmp(&b.name));
    Some(repos)
}

impl<R: CommandRunner> GitEngine<R> {
    /// Sub-repositories of `root` per the configured manifest name.
    #[must_use]
    pub fn discover_sub_repos(&self, root: &Path) -> Option<Vec<SubRepo>> {
        discover_sub_repos(root, &self.settings().manifest_name)
    }
}
