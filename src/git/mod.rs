// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Multi-repository git engine.
//!
//! ```text
//!   aggregate.rs  diff.rs  history.rs  mutation.rs  staging.rs
//!         \          |         |          /
//!          v         v         v         v
//!        ,----------------------------------,
//!        |     GitEngine<R: CommandRunner>  |
//!        |   status.rs   workspace.rs       |
//!        '--------+-------------------------'
//!                 |
//!                 v
//!          CommandRunner (trait)
//!           |              |
//!           v              v
//!      ShellRunner    scripted fakes
//!   (ProcessBuilder)     (tests)
//!
//!   query.rs --> gix (no subprocess, branch name)
//! ```
//!
//! Reads never fail: absence and transient command failures are folded into
//! conservative values. Mutations propagate failures with the captured
//! stderr. Callers must serialize mutations per repository path.

pub mod aggregate;
pub mod diff;
pub mod history;
pub mod mutation;
pub mod query;
pub mod runner;
pub mod staging;
pub mod status;
pub mod workspace;

#[cfg(test)]
pub(crate) mod testing;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
pub use runner::{CommandOutput, CommandRunner, Invocation, Program, ShellRunner};

/// Default manifest file name at a workspace root.
pub const MANIFEST_FILE: &str = "multi.json";

/// Tunables for the engine, usually derived from [`Config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSettings {
    /// Status and ahead/behind queries.
    pub status_timeout: Duration,
    /// Diff, log, show, apply and commit.
    pub read_timeout: Duration,
    /// Pull, push and remote creation.
    pub network_timeout: Duration,
    pub history_max_commits: usize,
    /// Maximum gap between adjacent commits of one history group.
    pub history_window_ms: i64,
    pub manifest_name: String,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            status_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            network_timeout: Duration::from_secs(120),
            history_max_commits: 250,
            history_window_ms: 60_000,
            manifest_name: MANIFEST_FILE.to_string(),
        }
    }
}

impl From<&Config> for GitSettings {
    fn from(config: &Config) -> Self {
        let git = &config.git;
        Self {
            status_timeout: Duration::from_secs(git.status_timeout_secs),
            read_timeout: Duration::from_secs(git.read_timeout_secs),
            network_timeout: Duration::from_secs(git.network_timeout_secs),
            history_max_commits: git.history_max_commits,
            history_window_ms: i64::try_from(git.history_window_secs)
                .map_or(i64::MAX, |secs| secs.saturating_mul(1000)),
            manifest_name: config.paths.manifest.clone(),
        }
    }
}

/// The aggregation and mutation engine, generic over its command executor.
#[derive(Debug, Clone)]
pub struct GitEngine<R> {
    runner: R,
    settings: GitSettings,
}

impl GitEngine<ShellRunner> {
    /// Engine backed by real `git`/`gh` processes.
    #[must_use]
    pub fn shell(settings: GitSettings) -> Self {
        Self::new(ShellRunner, settings)
    }
}

impl<R: CommandRunner> GitEngine<R> {
    pub const fn new(runner: R, settings: GitSettings) -> Self {
        Self { runner, settings }
    }

    #[must_use]
    pub const fn settings(&self) -> &GitSettings {
        &self.settings
    }

    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }
}

/// Display name of a repository: its last path segment, or the path itself.
#[must_use]
pub fn repo_display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Resolves a path for identity comparisons, falling back to the input.
pub(crate) fn resolved(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
