// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cross-repository history grouped into time windows.
//!
//! ```text
//! [root, sub_1 .. sub_n]  (dedup by resolved path)
//!        |  join_all: git log --date-order --max-count=N --pretty=format:...
//!        v
//! Vec<HistoryCommit>  sort (time desc, hash desc)
//!        |
//!        v
//! sliding window: |prev - next| <= window  --> same group
//!        |
//!        v
//! Vec<HistoryGroup>   newest first
//! ```
//!
//! Groups are chained by adjacency, so a group can span more than one
//! window when commits keep arriving within the window of each other.

use chrono::{DateTime, SecondsFormat};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::status::{Presence, presence};
use super::{CommandRunner, GitEngine, Invocation, repo_display_name, resolved};

/// `%x1f` separates fields, `%x1e` terminates records.
const HISTORY_FORMAT: &str = "%H%x1f%h%x1f%an%x1f%ae%x1f%at%x1f%s%x1f%b%x1e";
const FIELD_SEP: char = '\x1f';
const RECORD_SEP: char = '\x1e';

/// One parsed commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryCommit {
    pub hash: String,
    pub short_hash: String,
    pub subject: String,
    /// First non-blank line of the body.
    pub description: String,
    pub author_name: String,
    pub author_email: String,
    pub authored_at_ms: i64,
    pub authored_at_iso: String,
    pub repo_path: PathBuf,
    pub repo_name: String,
}

/// Commits from any repositories authored close together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryGroup {
    /// `"{newest_authored_at_ms}-{newest_hash}"`
    pub id: String,
    pub newest_authored_at_ms: i64,
    pub oldest_authored_at_ms: i64,
    pub authored_at_iso: String,
    /// Repository names in first-seen order.
    pub repo_names: Vec<String>,
    /// Newest first.
    pub commits: Vec<HistoryCommit>,
}

impl HistoryGroup {
    fn open(commit: HistoryCommit) -> Self {
        Self {
            id: format!("{}-{}", commit.authored_at_ms, commit.hash),
            newest_authored_at_ms: commit.authored_at_ms,
            oldest_authored_at_ms: commit.authored_at_ms,
            authored_at_iso: commit.authored_at_iso.clone(),
            repo_names: vec![commit.repo_name.clone()],
            commits: vec![commit],
        }
    }

    fn push(&mut self, commit: HistoryCommit) {
        self.oldest_authored_at_ms = commit.authored_at_ms;
        if !self.repo_names.contains(&commit.repo_name) {
            self.repo_names.push(commit.repo_name.clone());
        }
        self.commits.push(commit);
    }

    /// References to every commit of the group, for [`GitEngine::group_diffs`].
    #[must_use]
    pub fn commit_refs(&self) -> Vec<CommitRef> {
        self.commits
            .iter()
            .map(|c| CommitRef {
                repo_path: c.repo_path.clone(),
                repo_name: c.repo_name.clone(),
                hash: c.hash.clone(),
            })
            .collect()
    }
}

/// A commit identified by repository and hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRef {
    pub repo_path: PathBuf,
    pub repo_name: String,
    pub hash: String,
}

/// RFC 3339 UTC with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`.
#[must_use]
pub fn iso_millis(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

/// Parses `git log` output produced with the history format.
///
/// Records lacking a hash, short hash, subject or integer timestamp are
/// dropped.
#[must_use]
pub fn parse_log(output: &str, repo_path: &Path, repo_name: &str) -> Vec<HistoryCommit> {
    output
        .split(RECORD_SEP)
        .map(str::trim)
        .filter(|record| !record.is_empty())
        .filter_map(|record| parse_record(record, repo_path, repo_name))
        .collect()
}

fn parse_record(record: &str, repo_path: &Path, repo_name: &str) -> Option<HistoryCommit> {
    let mut fields = record.split(FIELD_SEP);
    let hash = fields.next().filter(|s| !s.is_empty())?;
    let short_hash = fields.next().filter(|s| !s.is_empty())?;
    let author_name = fields.next().unwrap_or_default();
    let author_email = fields.next().unwrap_or_default();
    let seconds: i64 = fields.next()?.trim().parse().ok()?;
    let subject = fields.next().filter(|s| !s.is_empty())?;
    let body = fields.collect::<Vec<_>>().join("\x1f");
    let description = body
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();

    let authored_at_ms = seconds.saturating_mul(1000);
    Some(HistoryCommit {
        hash: hash.to_string(),
        short_hash: short_hash.to_string(),
        subject: subject.to_string(),
        description: description.to_string(),
        author_name: author_name.to_string(),
        author_email: author_email.to_string(),
        authored_at_ms,
        authored_at_iso: iso_millis(authored_at_ms),
        repo_path: repo_path.to_path_buf(),
        repo_name: repo_name.to_string(),
    })
}

/// Sorts commits newest first (ties: greater hash first) and chains them into
/// groups whose adjacent commits are at most `window_ms` apart.
#[must_use]
pub fn group_commits(mut commits: Vec<HistoryCommit>, window_ms: i64) -> Vec<HistoryGroup> {
    commits.sort_by(|a, b| {
        b.authored_at_ms
            .cmp(&a.authored_at_ms)
            .then_with(|| b.hash.cmp(&a.hash))
    });

    let mut groups: Vec<HistoryGroup> = Vec::new();
    for commit in commits {
        let joins = groups
            .last()
            .and_then(|group| group.commits.last())
            .is_some_and(|prev| {
                prev.authored_at_ms.abs_diff(commit.authored_at_ms) <= window_ms.unsigned_abs()
            });

        match groups.last_mut() {
            Some(group) if joins => group.push(commit),
            _ => groups.push(HistoryGroup::open(commit)),
        }
    }
    groups
}

impl<R: CommandRunner> GitEngine<R> {
    /// Bounded log of one repository. Failures yield no commits.
    pub async fn repo_history(&self, path: &Path, name: &str) -> Vec<HistoryCommit> {
        if presence(path) == Presence::Missing || !self.is_repo_root(path).await {
            return Vec::new();
        }

        let invocation = Invocation::git(
            path,
            [
                "log".to_string(),
                "--date-order".to_string(),
                format!("--max-count={}", self.settings().history_max_commits),
                format!("--pretty=format:{HISTORY_FORMAT}"),
            ],
        )
        .timeout(self.settings().read_timeout);

        match self.runner().run(&invocation).await {
            Ok(output) => parse_log(output.stdout(), path, name),
            Err(e) => {
                debug!(repo = %path.display(), error = %e, "log failed");
                Vec::new()
            }
        }
    }

    /// History of the root and its sub-repositories, grouped in time windows.
    pub async fn combined_history(&self, root: &Path) -> Vec<HistoryGroup> {
        let mut repos = vec![(root.to_path_buf(), repo_display_name(root))];
        repos.extend(
            self.discover_sub_repos(root)
                .unwrap_or_default()
                .into_iter()
                .map(|sub| (sub.path, sub.name)),
        );

        let mut seen = Vec::new();
        repos.retain(|(path, _)| {
            let key = resolved(path);
            if seen.contains(&key) {
                false
            } else {
                seen.push(key);
                true
            }
        });

        let histories = join_all(
            repos
                .iter()
                .map(|(path, name)| self.repo_history(path, name)),
        )
        .await;

        group_commits(
            histories.into_iter().flatten().collect(),
            self.settings().history_window_ms,
        )
    }

    /// Patches of the referenced commits, bucketed per repository.
    ///
    /// Buckets keep first-seen order; a failed `show` contributes nothing and
    /// buckets without any patch text are dropped.
    pub async fn group_diffs(&self, refs: &[CommitRef]) -> Vec<super::diff::RepoDiff> {
        let mut buckets: Vec<(PathBuf, &CommitRef, Vec<&str>)> = Vec::new();
        for commit in refs {
            let key = resolved(&commit.repo_path);
            match buckets
                .iter_mut()
                .find(|(path, first, _)| *path == key && first.repo_name == commit.repo_name)
            {
                Some((_, _, hashes)) => hashes.push(&commit.hash),
                None => buckets.push((key, commit, vec![commit.hash.as_str()])),
            }
        }

        let diffs = join_all(buckets.iter().map(|(_, first, hashes)| async move {
            let patches = join_all(
                hashes
                    .iter()
                    .map(|hash| self.show_patch(&first.repo_path, hash)),
            )
            .await;
            patches
                .into_iter()
                .filter(|patch| !patch.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        }))
        .await;

        buckets
            .into_iter()
            .zip(diffs)
            .filter(|(_, diff)| !diff.is_empty())
            .map(|((_, first, _), diff)| super::diff::RepoDiff {
                repo_path: first.repo_path.clone(),
                repo_name: first.repo_name.clone(),
                diff,
            })
            .collect()
    }

    async fn show_patch(&self, repo: &Path, hash: &str) -> String {
        let invocation = Invocation::git(repo, ["show", "--format=", "--no-color", hash])
            .timeout(self.settings().read_timeout);
        match self.runner().run(&invocation).await {
            Ok(output) => output.stdout().trim().to_string(),
            Err(e) => {
                debug!(repo = %repo.display(), hash, error = %e, "show failed");
                String::new()
            }
        }
    }
}
