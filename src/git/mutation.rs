// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Staging, commits, discards and synchronization.
//!
//! ```text
//! stage_patch    reset HEAD (tolerated) --> apply --cached --unidiff-zero -
//! stage_paths    add -- <paths>
//! commit         commit -m <message>
//! discard_file   new: remove from disk | tracked: checkout -- <path>
//! discard_lines  apply --unidiff-zero -
//!
//! push           absent? --> no-op
//!                not dirty? --> pull --ff-only (failure logged)
//!                push (failure propagated)
//!
//! create_remote_and_push
//!                absent? --> NotARepository
//!                remote get-url origin --failed--> gh repo create --private
//!                push -u origin HEAD
//!
//! push_all       unique paths, sequential push
//!                "no destination" failures --> create_remote_and_push
//!                --> SyncReport
//! ```
//!
//! Every operation mutates the repository it is given; callers must not run
//! two of them on the same path concurrently.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::status::RepoStatus;
use super::{CommandRunner, GitEngine, Invocation, repo_display_name};
use crate::error::{GitError, MultiError, MultiResult};
use crate::utility::summary::{BatchFailures, Overflow};

/// Failures shown in a sync summary before collapsing the rest.
const SYNC_FAILURES_SHOWN: usize = 5;

const NO_DESTINATION_MARKERS: [&str; 2] =
    ["No configured push destination", "has no upstream branch"];

const GITHUB_REMOTE_PREFIXES: [&str; 4] = [
    "git@github.com:",
    "ssh://git@github.com/",
    "https://github.com/",
    "http://github.com/",
];

/// A repository that failed to sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncFailure {
    pub repo_path: PathBuf,
    pub repo_name: String,
    /// Single-line summary of the failure.
    pub message: String,
}

/// Outcome of [`GitEngine::push_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub total: usize,
    pub synced: usize,
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// `Sync completed with errors (S/N repos synced):` followed by the first
    /// failures, or `None` when every repository synced.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }
        let mut failures = BatchFailures::new();
        for failure in &self.failures {
            failures.push(&failure.repo_name, &failure.message);
        }
        Some(format!(
            "Sync completed with errors ({}/{} repos synced):\n{}",
            self.synced,
            self.total,
            failures.render(SYNC_FAILURES_SHOWN, Overflow::Lines)
        ))
    }
}

/// Raw text of a failure: the captured stderr for failed commands, else the
/// error message.
#[must_use]
pub fn sync_error_text(error: &MultiError) -> String {
    error
        .as_git()
        .and_then(GitError::stderr)
        .filter(|stderr| !stderr.trim().is_empty())
        .map_or_else(|| error.to_string(), ToString::to_string)
}

/// True if a push failed because the branch has nowhere to go.
#[must_use]
pub fn is_no_push_destination(raw: &str) -> bool {
    NO_DESTINATION_MARKERS.iter().any(|marker| raw.contains(marker))
}

/// Reduces multi-line push output to its most telling line.
///
/// Preference: a `[rejected]` line, then an `error:` line, then the first
/// line that is not a `Command failed:` echo.
#[must_use]
pub fn summarize_sync_error(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty() && !line.starts_with("To https://") && !line.starts_with("hint:")
        })
        .collect();

    let Some(first) = lines.first() else {
        return "Unknown sync error".to_string();
    };
    lines
        .iter()
        .find(|line| line.contains("[rejected]"))
        .or_else(|| lines.iter().find(|line| line.starts_with("error:")))
        .or_else(|| lines.iter().find(|line| !line.starts_with("Command failed:")))
        .unwrap_or(first)
        .to_string()
}

/// Maps a GitHub remote URL to its web page.
///
/// Accepts `git@github.com:o/r`, `ssh://git@github.com/o/r` and
/// `http(s)://github.com/o/r`, each with an optional `.git` suffix.
#[must_use]
pub fn github_web_url(remote: &str) -> Option<String> {
    let trimmed = remote.trim();
    let slug = GITHUB_REMOTE_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))?;
    let slug = slug.strip_suffix(".git").unwrap_or(slug);
    (!slug.is_empty()).then(|| format!("https://github.com/{slug}"))
}

impl<R: CommandRunner> GitEngine<R> {
    async fn git(&self, repo: &Path, invocation: Invocation) -> MultiResult<String> {
        debug!(repo = %repo.display(), cmd = %invocation.command_line(), "exec");
        Ok(self.runner().run(&invocation).await?.into_stdout())
    }

    /// Replaces the index with `HEAD` plus `patch`.
    ///
    /// The reset fails on a repository without commits; the patch is then
    /// applied on top of the empty index.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git apply --cached` rejects the patch.
    pub async fn stage_patch(&self, repo: &Path, patch: &str) -> MultiResult<()> {
        let timeout = self.settings().read_timeout;
        let reset = Invocation::git(repo, ["reset", "HEAD"]).timeout(timeout);
        if let Err(e) = self.git(repo, reset).await {
            debug!(repo = %repo.display(), error = %e, "reset before staging failed");
        }

        let apply = Invocation::git(
            repo,
            ["apply", "--cached", "--unidiff-zero", "--whitespace=nowarn", "-"],
        )
        .timeout(timeout)
        .stdin(patch);
        self.git(repo, apply).await?;
        Ok(())
    }

    /// Stages whole paths. An empty list does nothing.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git add` fails.
    pub async fn stage_paths<S: AsRef<str>>(&self, repo: &Path, paths: &[S]) -> MultiResult<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let args = ["add", "--"]
            .into_iter()
            .map(str::to_string)
            .chain(paths.iter().map(|p| p.as_ref().to_string()));
        let add = Invocation::git(repo, args).timeout(self.settings().read_timeout);
        self.git(repo, add).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a `GitError` carrying git's stderr if the commit fails.
    pub async fn commit(&self, repo: &Path, message: &str) -> MultiResult<()> {
        let commit =
            Invocation::git(repo, ["commit", "-m", message]).timeout(self.settings().read_timeout);
        self.git(repo, commit).await?;
        info!(repo = %repo.display(), "committed");
        Ok(())
    }

    /// Drops all working-tree changes to one file.
    ///
    /// An untracked file is deleted from disk; a tracked one is checked out
    /// from the index.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be removed, or a `GitError`
    /// if the checkout fails.
    pub async fn discard_file(&self, repo: &Path, path: &str, is_new: bool) -> MultiResult<()> {
        if is_new {
            let target = repo.join(path);
            debug!(file = %target.display(), "removing untracked file");
            tokio::fs::remove_file(&target).await?;
            return Ok(());
        }
        let checkout =
            Invocation::git(repo, ["checkout", "--", path]).timeout(self.settings().read_timeout);
        self.git(repo, checkout).await?;
        Ok(())
    }

    /// Applies a discard patch to the working tree.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git apply` rejects the patch.
    pub async fn discard_lines(&self, repo: &Path, patch: &str) -> MultiResult<()> {
        let apply = Invocation::git(repo, ["apply", "--unidiff-zero", "--whitespace=nowarn", "-"])
            .timeout(self.settings().read_timeout)
            .stdin(patch);
        self.git(repo, apply).await?;
        Ok(())
    }

    /// Pulls (fast-forward only, when the tree is not dirty) and pushes.
    ///
    /// Missing paths and non-repositories are skipped silently. A failing
    /// pull is ignored: a diverged branch then surfaces as a push rejection.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if `git push` fails.
    pub async fn push(&self, repo: &Path) -> MultiResult<()> {
        let status = self.resolve_status(repo).await;
        if status.is_absent() {
            debug!(repo = %repo.display(), %status, "skipping push");
            return Ok(());
        }

        let timeout = self.settings().network_timeout;
        if status != RepoStatus::Dirty {
            let pull = Invocation::git(repo, ["pull", "--ff-only"]).timeout(timeout);
            if let Err(e) = self.git(repo, pull).await {
                debug!(repo = %repo.display(), error = %e, "pull skipped");
            }
        }

        let push = Invocation::git(repo, ["push"]).timeout(timeout);
        self.git(repo, push).await?;
        info!(repo = %repo.display(), "pushed");
        Ok(())
    }

    /// Creates a private GitHub repository as `origin` if none is set, then
    /// pushes the current branch with upstream tracking.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NotARepository` for absent repositories,
    /// `GitError::RemoteCreateFailed` if `gh repo create` fails, or the push
    /// failure.
    pub async fn create_remote_and_push(&self, repo: &Path) -> MultiResult<()> {
        if self.resolve_status(repo).await.is_absent() {
            return Err(GitError::NotARepository {
                path: repo.display().to_string(),
            }
            .into());
        }

        let timeout = self.settings().network_timeout;
        let origin = Invocation::git(repo, ["remote", "get-url", "origin"]).timeout(timeout);
        if self.git(repo, origin).await.is_err() {
            let name = repo_display_name(repo);
            info!(repo = %repo.display(), name, "creating private GitHub repository");
            let create = Invocation::gh(
                repo,
                [
                    "repo", "create", name.as_str(), "--private", "--source", ".", "--remote", "origin",
                ],
            )
            .timeout(timeout);
            if let Err(e) = self.git(repo, create).await {
                let details = sync_error_text(&e).trim().to_string();
                let details = if details.is_empty() {
                    "Unknown error creating GitHub repository.".to_string()
                } else {
                    details
                };
                return Err(GitError::RemoteCreateFailed { details }.into());
            }
        }

        let push = Invocation::git(repo, ["push", "-u", "origin", "HEAD"]).timeout(timeout);
        self.git(repo, push).await?;
        info!(repo = %repo.display(), "published");
        Ok(())
    }

    /// Pushes each distinct path in order, one at a time.
    ///
    /// With `create_missing`, repositories that fail for lack of a push
    /// destination are retried through [`Self::create_remote_and_push`].
    pub async fn push_all(&self, paths: &[PathBuf], create_missing: bool) -> SyncReport {
        let mut unique: Vec<&PathBuf> = Vec::with_capacity(paths.len());
        for path in paths {
            if !unique.contains(&path) {
                unique.push(path);
            }
        }

        let mut report = SyncReport {
            total: unique.len(),
            ..SyncReport::default()
        };
        for path in unique {
            let mut result = self.push(path).await;
            if create_missing
                && let Err(e) = &result
                && is_no_push_destination(&sync_error_text(e))
            {
                info!(repo = %path.display(), "no push destination, publishing");
                result = self.create_remote_and_push(path).await;
            }

            match result {
                Ok(()) => report.synced += 1,
                Err(e) => {
                    let message = summarize_sync_error(&sync_error_text(&e));
                    warn!(repo = %path.display(), %message, "sync failed");
                    report.failures.push(SyncFailure {
                        repo_path: path.clone(),
                        repo_name: repo_display_name(path),
                        message,
                    });
                }
            }
        }
        report
    }

    /// GitHub web page of the `origin` remote.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the remote cannot be read, or
    /// `GitError::NotGitHubRemote` if it is not a GitHub URL.
    pub async fn remote_web_url(&self, repo: &Path) -> MultiResult<String> {
        let origin = Invocation::git(repo, ["remote", "get-url", "origin"])
            .timeout(self.settings().status_timeout);
        let remote = self.git(repo, origin).await?;
        github_web_url(&remote).ok_or_else(|| GitError::NotGitHubRemote.into())
    }
}
