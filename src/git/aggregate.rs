// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Worst-case status across a workspace root and its sub-repositories.
//!
//! ```text
//! no sub-repos ------------------------> resolve_status(root)
//!
//! sub-repos:  join_all [ root (untracked ignored), sub_1 .. sub_n ]
//!   seed  = root, with not-a-repo/missing -> clean
//!   fold  = max-by-rank over subs, skipping not-a-repo/missing
//! ```

use futures_util::future::join_all;
use std::path::Path;

use super::status::RepoStatus;
use super::{CommandRunner, GitEngine};

/// Folds a root status with its sub-repository statuses.
#[must_use]
pub fn fold_statuses(root: RepoStatus, subs: &[RepoStatus]) -> RepoStatus {
    let seed = if root.is_absent() {
        RepoStatus::Clean
    } else {
        root
    };
    subs.iter()
        .copied()
        .filter(|status| !status.is_absent())
        .fold(seed, RepoStatus::worst)
}

impl<R: CommandRunner> GitEngine<R> {
    /// Status of a registry entry, taking its workspace manifest into account.
    pub async fn resolve_aggregate_status(&self, root: &Path) -> RepoStatus {
        let subs = self.discover_sub_repos(root).unwrap_or_default();
        if subs.is_empty() {
            return self.resolve_status(root).await;
        }

        // Untracked entries at a workspace root are usually the sub-repo
        // checkouts themselves.
        let root_status = self.resolve_status_with(root, true);
        let sub_statuses = join_all(subs.iter().map(|sub| self.resolve_status(&sub.path)));
        let (root_status, sub_statuses) = futures_util::join!(root_status, sub_statuses);

        fold_statuses(root_status, &sub_statuses)
    }
}
