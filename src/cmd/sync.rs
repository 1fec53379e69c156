// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Push, publish and web URL commands.

use anyhow::anyhow;

use super::{engine, spinner, workspace_paths};
use crate::cli::sync::PushArgs;
use crate::cli::view::RepoArgs;
use crate::config::Config;
use crate::error::Result;
use crate::git::repo_display_name;

/// Pushes the workspace root and each sub-repository in turn.
///
/// # Errors
///
/// Returns the capped failure summary if any repository failed.
pub async fn run_push_command(args: &PushArgs, config: &Config) -> Result<()> {
    let engine = engine(config);
    let paths = workspace_paths(&engine, &args.repo.path);

    let pb = spinner(format!("Pushing {} repositories", paths.len()));
    let report = engine.push_all(&paths, args.create_missing).await;
    pb.finish_and_clear();

    match report.summary() {
        Some(summary) => Err(anyhow!(summary)),
        None => {
            println!("Synced {}/{} repositories", report.synced, report.total);
            Ok(())
        }
    }
}

/// Creates a private GitHub repository when `origin` is missing, then pushes.
///
/// # Errors
///
/// Returns an error if the repository is absent or creation or push fails.
pub async fn run_publish_command(args: &RepoArgs, config: &Config) -> Result<()> {
    let name = repo_display_name(&args.path);
    let pb = spinner(format!("Publishing {name}"));
    let result = engine(config).create_remote_and_push(&args.path).await;
    pb.finish_and_clear();

    result?;
    println!("Published {name}");
    Ok(())
}

/// Prints the GitHub page of the repository's `origin`.
///
/// # Errors
///
/// Returns an error if `origin` is missing or not a GitHub remote.
pub async fn run_web_command(args: &RepoArgs, config: &Config) -> Result<()> {
    let url = engine(config).remote_web_url(&args.path).await?;
    println!("{url}");
    Ok(())
}
