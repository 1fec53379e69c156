// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Registry command implementation.

use anyhow::Context;
use futures_util::future::join_all;
use std::path::Path;

use super::engine;
use super::view::describe_sync;
use crate::cli::repos::{ReposArgs, ReposSubcommand};
use crate::config::Config;
use crate::error::Result;
use crate::store::Registry;

/// Main handler for the `repos` command.
///
/// # Errors
///
/// Returns an error if the path cannot be made absolute or the registry
/// cannot be written.
pub async fn run_repos_command(args: &ReposArgs, config: &Config) -> Result<()> {
    let registry = Registry::new(config.paths.registry_path());
    match &args.subcommand {
        ReposSubcommand::List => {
            list_repos(&registry, config).await;
            Ok(())
        }
        ReposSubcommand::Add { path } => {
            let path = absolute(path)?;
            if registry.add(&path)? {
                println!("Added {path}");
            } else {
                println!("Already registered: {path}");
            }
            Ok(())
        }
        ReposSubcommand::Remove { path } => {
            let path = absolute(path)?;
            if registry.remove(&path)? {
                println!("Removed {path}");
            } else {
                println!("Not registered: {path}");
            }
            Ok(())
        }
    }
}

fn absolute(path: &Path) -> Result<String> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("failed to resolve {}", path.display()))?;
    Ok(absolute.to_string_lossy().into_owned())
}

async fn list_repos(registry: &Registry, config: &Config) {
    let entries = registry.list();
    if entries.is_empty() {
        println!("No repositories registered in {}", registry.path().display());
        return;
    }

    let engine = engine(config);
    let rows = join_all(entries.iter().map(|entry| {
        let engine = &engine;
        async move {
            let path = Path::new(&entry.path);
            let (status, sync) = tokio::join!(
                engine.resolve_aggregate_status(path),
                engine.resolve_sync_state(path)
            );
            (status, sync)
        }
    }))
    .await;

    for (entry, (status, sync)) in entries.iter().zip(rows) {
        println!(
            "{:<24} {:<12} {:<20} {}",
            entry.name,
            status.as_str(),
            describe_sync(&sync),
            entry.path
        );
    }
}
