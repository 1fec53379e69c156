// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only workspace commands.

use anyhow::anyhow;
use futures_util::future::join_all;

use super::engine;
use crate::cli::view::{DiffArgs, HistoryArgs, RepoArgs, ShowArgs};
use crate::config::Config;
use crate::error::Result;
use crate::git::diff::RepoDiff;
use crate::git::query::current_branch;
use crate::git::repo_display_name;
use crate::git::status::{RepoStatus, RepoSyncState};

/// `ahead N, behind M`, `no upstream` or `-` outside a repository.
#[must_use]
pub fn describe_sync(sync: &RepoSyncState) -> String {
    if !sync.is_repo {
        "-".to_string()
    } else if !sync.has_upstream {
        "no upstream".to_string()
    } else {
        format!("ahead {}, behind {}", sync.ahead, sync.behind)
    }
}

fn print_repo_diffs(diffs: &[RepoDiff]) {
    for repo in diffs.iter().filter(|d| !d.diff.trim().is_empty()) {
        println!("# Repo: {}", repo.repo_name);
        println!("{}", repo.diff.trim_end());
    }
}

/// Repository name, with the checked-out branch when there is one.
fn status_label(root: &std::path::Path, status: RepoStatus) -> String {
    let name = repo_display_name(root);
    if status.is_absent() {
        return name;
    }
    match current_branch(root) {
        Ok(Some(branch)) => format!("{name} [{branch}]"),
        Ok(None) => format!("{name} [detached]"),
        Err(e) => {
            tracing::debug!(repo = %root.display(), error = %e, "branch lookup failed");
            name
        }
    }
}

/// Aggregate status, sync state and per sub-repository status.
pub async fn run_status_command(args: &RepoArgs, config: &Config) {
    let engine = engine(config);
    let root = args.path.as_path();
    let (status, sync) = tokio::join!(
        engine.resolve_aggregate_status(root),
        engine.resolve_sync_state(root)
    );
    println!(
        "{}: {status} ({})",
        status_label(root, status),
        describe_sync(&sync)
    );

    let subs = engine.discover_sub_repos(root).unwrap_or_default();
    let statuses = join_all(subs.iter().map(|sub| engine.resolve_status(&sub.path))).await;
    for (sub, status) in subs.iter().zip(statuses) {
        println!("  {:<24} {status}", sub.name);
    }
}

/// Lists the manifest's sub-repositories.
pub fn run_subrepos_command(args: &RepoArgs, config: &Config) {
    let engine = engine(config);
    match engine.discover_sub_repos(&args.path) {
        None => println!("No workspace manifest ({})", config.paths.manifest),
        Some(subs) if subs.is_empty() => println!("Manifest declares no sub-repositories"),
        Some(subs) => {
            for sub in subs {
                println!("{:<24} {}", sub.name, sub.path.display());
            }
        }
    }
}

/// Prints the working tree diff of one repository or the whole workspace.
pub async fn run_diff_command(args: &DiffArgs, config: &Config) {
    let engine = engine(config);
    if args.combined {
        print_repo_diffs(&engine.build_combined_diff(&args.repo.path).await);
    } else {
        let diff = engine.build_diff(&args.repo.path).await;
        if !diff.is_empty() {
            println!("{}", diff.trim_end());
        }
    }
}

/// Lists history groups, newest first.
pub async fn run_history_command(args: &HistoryArgs, config: &Config) {
    let engine = engine(config);
    let groups = engine.combined_history(&args.repo.path).await;
    if groups.is_empty() {
        println!("No commits");
        return;
    }

    let limit = args.limit.unwrap_or(usize::MAX);
    for group in groups.iter().take(limit) {
        println!(
            "{}  {}  [{}]",
            group.id,
            group.authored_at_iso,
            group.repo_names.join(", ")
        );
        for commit in &group.commits {
            println!(
                "    {} {:<16} {}",
                commit.short_hash, commit.repo_name, commit.subject
            );
        }
    }
}

/// Prints the combined diff of one history group.
///
/// # Errors
///
/// Returns an error if no group has the given id.
pub async fn run_show_command(args: &ShowArgs, config: &Config) -> Result<()> {
    let engine = engine(config);
    let groups = engine.combined_history(&args.repo.path).await;
    let group = groups
        .iter()
        .find(|g| g.id == args.group)
        .ok_or_else(|| anyhow!("No history group with id {}", args.group))?;

    let diffs = engine.group_diffs(&group.commit_refs()).await;
    if diffs.is_empty() {
        println!("No changes");
    } else {
        print_repo_diffs(&diffs);
    }
    Ok(())
}
