// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Single-repository status and sync state.
//!
//! ```text
//! path exists? --no--> missing
//!      |
//! .git exists? --no--> not-a-repo
//!      |
//! status --porcelain  --non-empty/failed--> dirty
//!      |
//! rev-list --left-right --count HEAD...@{u}
//!      |--failed-------------> out-of-sync
//!      |--ahead|behind > 0---> out-of-sync
//!      '--0 0----------------> clean
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

use super::{CommandRunner, GitEngine, Invocation};
use crate::error::MultiResult;

/// Status of one repository, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepoStatus {
    Clean,
    Dirty,
    OutOfSync,
    NotARepo,
    Missing,
}

impl RepoStatus {
    /// Severity rank: `clean < not-a-repo < out-of-sync < dirty < missing`.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::NotARepo => 1,
            Self::OutOfSync => 2,
            Self::Dirty => 3,
            Self::Missing => 4,
        }
    }

    /// The more severe of two statuses; ties keep `self`.
    #[must_use]
    pub const fn worst(self, other: Self) -> Self {
        if self.rank() >= other.rank() { self } else { other }
    }

    /// `missing` and `not-a-repo` have no repository behind them.
    #[must_use]
    pub const fn is_absent(self) -> bool {
        matches!(self, Self::Missing | Self::NotARepo)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Dirty => "dirty",
            Self::OutOfSync => "out-of-sync",
            Self::NotARepo => "not-a-repo",
            Self::Missing => "missing",
        }
    }
}

impl fmt::Display for RepoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ahead/behind counts against the upstream branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoSyncState {
    pub ahead: u32,
    pub behind: u32,
    pub has_upstream: bool,
    pub is_repo: bool,
}

/// Filesystem presence of a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Presence {
    Missing,
    NotARepo,
    Repo,
}

pub(crate) fn presence(path: &Path) -> Presence {
    if !path.exists() {
        Presence::Missing
    } else if !path.join(".git").exists() {
        Presence::NotARepo
    } else {
        Presence::Repo
    }
}

/// Parses `rev-list --left-right --count` output; unparseable counts are 0.
pub(crate) fn parse_counts(output: &str) -> (u32, u32) {
    let mut counts = output
        .split_whitespace()
        .map(|field| field.parse::<u32>().unwrap_or(0));
    let ahead = counts.next().unwrap_or(0);
    let behind = counts.next().unwrap_or(0);
    (ahead, behind)
}

impl<R: CommandRunner> GitEngine<R> {
    /// Resolves the status of a single repository. Never fails.
    pub async fn resolve_status(&self, path: &Path) -> RepoStatus {
        self.resolve_status_with(path, false).await
    }

    /// Like [`Self::resolve_status`], optionally ignoring untracked entries.
    pub async fn resolve_status_with(&self, path: &Path, ignore_untracked: bool) -> RepoStatus {
        match presence(path) {
            Presence::Missing => return RepoStatus::Missing,
            Presence::NotARepo => return RepoStatus::NotARepo,
            Presence::Repo => {}
        }

        let mut args = vec!["status", "--porcelain"];
        if ignore_untracked {
            args.push("--untracked-files=no");
        }
        let porcelain = Invocation::git(path, args).timeout(self.settings().status_timeout);
        match self.runner().run(&porcelain).await {
            Ok(output) if !output.stdout().trim().is_empty() => return RepoStatus::Dirty,
            Ok(_) => {}
            Err(e) => {
                warn!(repo = %path.display(), error = %e, "status query failed, reporting dirty");
                return RepoStatus::Dirty;
            }
        }

        match self.ahead_behind(path).await {
            Ok((0, 0)) => RepoStatus::Clean,
            Ok(_) => RepoStatus::OutOfSync,
            Err(e) => {
                debug!(repo = %path.display(), error = %e, "no upstream");
                RepoStatus::OutOfSync
            }
        }
    }

    /// Resolves ahead/behind counts. Never fails.
    pub async fn resolve_sync_state(&self, path: &Path) -> RepoSyncState {
        if presence(path) != Presence::Repo {
            return RepoSyncState::default();
        }

        match self.ahead_behind(path).await {
            Ok((ahead, behind)) => RepoSyncState {
                ahead,
                behind,
                has_upstream: true,
                is_repo: true,
            },
            Err(_) => RepoSyncState {
                is_repo: true,
                ..RepoSyncState::default()
            },
        }
    }

    async fn ahead_behind(&self, path: &Path) -> MultiResult<(u32, u32)> {
        let invocation = Invocation::git(path, ["rev-list", "--left-right", "--count", "HEAD...@{u}"])
            .timeout(self.settings().status_timeout);
        let output = self.runner().run(&invocation).await?;
        Ok(parse_counts(output.stdout()))
    }
}
