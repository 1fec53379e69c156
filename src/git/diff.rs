// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Working-tree diffs including untracked files.
//!
//! ```text
//! build_diff(repo)
//!   rev-parse --show-toplevel == repo ?  (else "")
//!   join: diff | diff --cached | ls-files -z --others --exclude-standard
//!   join: diff --no-index -- /dev/null <file>   (per untracked file, exit 1 = ok)
//!   --> unstaged + staged + untracked...
//!
//! build_combined_diff(root)
//!   join: [root, sub_1 .. sub_n] --> Vec<RepoDiff> in input order
//! ```

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{CommandRunner, GitEngine, Invocation, repo_display_name, resolved};
use crate::error::{GitError, MultiError, MultiResult};

/// A diff attributed to one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoDiff {
    pub repo_path: PathBuf,
    pub repo_name: String,
    pub diff: String,
}

impl<R: CommandRunner> GitEngine<R> {
    /// True if `path` is the top level of its own repository.
    ///
    /// A subdirectory of an enclosing repository is rejected. A failing
    /// query answers `false`.
    pub async fn is_repo_root(&self, path: &Path) -> bool {
        let invocation = Invocation::git(path, ["rev-parse", "--show-toplevel"])
            .timeout(self.settings().read_timeout);
        match self.runner().run(&invocation).await {
            Ok(output) => {
                let top = output.stdout().trim();
                !top.is_empty() && resolved(Path::new(top)) == resolved(path)
            }
            Err(e) => {
                debug!(repo = %path.display(), error = %e, "not a repository root");
                false
            }
        }
    }

    /// Unstaged, staged and untracked changes of one repository.
    ///
    /// Returns an empty string when `repo` is not a repository root or any
    /// of the primary queries fails.
    pub async fn build_diff(&self, repo: &Path) -> String {
        if !self.is_repo_root(repo).await {
            return String::new();
        }
        match self.try_build_diff(repo).await {
            Ok(diff) => diff,
            Err(e) => {
                warn!(repo = %repo.display(), error = %e, "diff failed");
                String::new()
            }
        }
    }

    async fn try_build_diff(&self, repo: &Path) -> MultiResult<String> {
        let timeout = self.settings().read_timeout;
        let unstaged = Invocation::git(repo, ["diff"]).timeout(timeout);
        let staged = Invocation::git(repo, ["diff", "--cached"]).timeout(timeout);
        // NUL-separated names are never C-quoted.
        let untracked =
            Invocation::git(repo, ["ls-files", "-z", "--others", "--exclude-standard"])
                .timeout(timeout);

        let (unstaged, staged, untracked) = futures_util::join!(
            self.runner().run(&unstaged),
            self.runner().run(&staged),
            self.runner().run(&untracked),
        );
        let (unstaged, staged, untracked) = (unstaged?, staged?, untracked?);

        let files: Vec<&str> = untracked
            .stdout()
            .split('\0')
            .filter(|name| !name.is_empty())
            .collect();
        let fragments = join_all(files.iter().map(|file| self.untracked_fragment(repo, file))).await;

        let mut diff = unstaged.into_stdout();
        diff.push_str(staged.stdout());
        for fragment in fragments {
            diff.push_str(&fragment);
        }
        Ok(diff)
    }

    /// `diff --no-index` against `/dev/null`; exit 1 with output is success.
    async fn untracked_fragment(&self, repo: &Path, file: &str) -> String {
        let invocation = Invocation::git(repo, ["diff", "--no-index", "--", "/dev/null", file])
            .timeout(self.settings().read_timeout);
        match self.runner().run(&invocation).await {
            Ok(output) => output.into_stdout(),
            Err(MultiError::Git(e)) => match *e {
                GitError::CommandFailed { code: 1, stdout, .. } => stdout,
                other => {
                    debug!(repo = %repo.display(), file, error = %other, "untracked diff failed");
                    String::new()
                }
            },
            Err(e) => {
                debug!(repo = %repo.display(), file, error = %e, "untracked diff failed");
                String::new()
            }
        }
    }

    /// Diffs of the root and every declared sub-repository, root first.
    pub async fn build_combined_diff(&self, root: &Path) -> Vec<RepoDiff> {
        let mut repos = vec![(root.to_path_buf(), repo_display_name(root))];
        repos.extend(
            self.discover_sub_repos(root)
                .unwrap_or_default()
                .into_iter()
                .map(|sub| (sub.path, sub.name)),
        );

        let diffs = join_all(repos.iter().map(|(path, _)| self.build_diff(path))).await;
        repos
            .into_iter()
            .zip(diffs)
            .map(|((repo_path, repo_name), diff)| RepoDiff {
                repo_path,
                repo_name,
                diff,
            })
            .collect()
    }
}
