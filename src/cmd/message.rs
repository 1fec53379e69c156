// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commit message generation and settings commands.

use anyhow::anyhow;

use super::{engine, spinner};
use crate::ai::CommitMessageGenerator;
use crate::cli::change::MessageArgs;
use crate::cli::settings::{SettingsArgs, SettingsSubcommand};
use crate::config::Config;
use crate::error::{AiError, Result};
use crate::git::diff::RepoDiff;
use crate::git::staging::{FileSelection, selected_diff, selected_diff_for_message};
use crate::patch::parse_diff;
use crate::store::SettingsStore;

/// Every change of each repository, fully selected.
fn full_selections(diffs: Vec<RepoDiff>) -> Vec<(String, Vec<FileSelection>)> {
    diffs
        .into_iter()
        .map(|d| {
            let entries = parse_diff(&d.diff)
                .into_iter()
                .map(FileSelection::all)
                .collect();
            (d.repo_name, entries)
        })
        .collect()
}

/// Generates a commit message for the workspace's current changes.
///
/// # Errors
///
/// Returns an error if there are no changes, no API key, or generation
/// fails for every repository.
pub async fn run_message_command(args: &MessageArgs, config: &Config) -> Result<()> {
    let settings = SettingsStore::new(config.paths.settings_path()).get();
    let api_key = settings.api_key();
    let generator = CommitMessageGenerator::from(config);
    let repos = full_selections(engine(config).build_combined_diff(&args.repo.path).await);

    if args.per_repo {
        let diffs: Vec<(String, String)> = repos
            .iter()
            .map(|(name, entries)| (name.clone(), selected_diff(entries)))
            .filter(|(_, diff)| !diff.trim().is_empty())
            .collect();
        if diffs.is_empty() {
            return Err(AiError::EmptyDiff.into());
        }

        let pb = spinner(format!("Generating {} messages", diffs.len()));
        let batch = generator.generate_per_repo(&diffs, api_key).await;
        pb.finish_and_clear();

        for (name, message) in &batch.messages {
            println!("{name}: {message}");
        }
        return batch.summary().map_or(Ok(()), |summary| Err(anyhow!(summary)));
    }

    let diff = selected_diff_for_message(&repos)?;
    let pb = spinner("Generating message");
    let result = generator.generate(&diff, api_key).await;
    pb.finish_and_clear();

    println!("{}", result?);
    Ok(())
}

/// Main handler for the `settings` command.
///
/// # Errors
///
/// Returns an error if the settings file cannot be written.
pub fn run_settings_command(args: &SettingsArgs, config: &Config) -> Result<()> {
    let store = SettingsStore::new(config.paths.settings_path());
    match &args.subcommand {
        SettingsSubcommand::SetKey { key } => {
            store.set_api_key(key)?;
            if key.trim().is_empty() {
                println!("API key cleared in {}", store.path().display());
            } else {
                println!("API key stored in {}", store.path().display());
            }
        }
        SettingsSubcommand::Show => {
            let settings = store.get();
            println!("settings     = {}", store.path().display());
            println!(
                "openAIApiKey = {}",
                if settings.api_key().is_some() {
                    "[hidden]"
                } else {
                    "(not set)"
                }
            );
        }
    }
    Ok(())
}
