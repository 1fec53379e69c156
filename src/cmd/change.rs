// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Commands that change the index or working tree.

use anyhow::{Context, bail};
use std::path::Path;

use super::engine;
use crate::cli::change::{
    CommitArgs, DiscardArgs, DiscardLinesArgs, LineSelection, PatchInput, StageArgs,
};
use crate::config::Config;
use crate::error::{PatchError, Result};
use crate::git::repo_display_name;
use crate::git::staging::FileSelection;
use crate::patch::{DiffSelection, format_discard_patch, parse_diff};

/// Pairs the files of a patch with the lines picked from them.
///
/// Files without a selection are left out.
///
/// # Errors
///
/// Returns an error if the patch has no file sections or a selection names
/// a file the patch does not contain.
pub fn select_files(
    patch: &str,
    source_name: &str,
    selections: &[LineSelection],
) -> Result<Vec<FileSelection>> {
    let files = parse_diff(patch);
    if files.is_empty() {
        return Err(PatchError::NoFiles {
            source_name: source_name.to_string(),
        }
        .into());
    }

    if let Some(unknown) = selections
        .iter()
        .find(|s| !files.iter().any(|f| f.display_path() == s.file))
    {
        bail!("no file '{}' in patch '{source_name}'", unknown.file);
    }

    Ok(files
        .into_iter()
        .filter_map(|file| {
            let lines = selections
                .iter()
                .filter(|s| s.file == file.display_path())
                .collect::<Vec<_>>();
            if lines.is_empty() {
                return None;
            }
            let selection = if lines.iter().any(|s| s.lines.is_none()) {
                DiffSelection::all()
            } else {
                DiffSelection::from_indices(
                    lines.iter().flat_map(|s| s.lines.iter().flatten().copied()),
                )
            };
            Some(FileSelection::new(file, selection))
        })
        .collect())
}

fn read_patch(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Stages a raw patch, selected lines of it, or whole paths.
///
/// # Errors
///
/// Returns an error if no input is given, the patch cannot be read or git
/// rejects the change.
pub async fn run_stage_command(args: &StageArgs, config: &Config) -> Result<()> {
    let engine = engine(config);
    let repo = args.repo.path.as_path();
    let name = repo_display_name(repo);
    let message = args
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty());

    if let Some(patch_path) = &args.input.patch {
        let patch = read_patch(patch_path)?;
        if args.input.select.is_empty() {
            engine.stage_patch(repo, &patch).await?;
        } else {
            let source = patch_path.display().to_string();
            let entries = select_files(&patch, &source, &args.input.select)?;
            let plan = engine.stage_and_commit(repo, &entries, message).await?;
            println!(
                "Staged {} in {name}",
                if plan.patch.is_empty() {
                    format!("{} path(s)", plan.paths.len())
                } else {
                    format!("selected lines and {} path(s)", plan.paths.len())
                }
            );
            if message.is_some() {
                println!("Committed {name}");
            }
            return Ok(());
        }
    } else if !args.paths.is_empty() {
        engine.stage_paths(repo, &args.paths).await?;
    } else {
        bail!("nothing to stage: pass --patch FILE or --paths PATH...");
    }

    println!("Staged changes in {name}");
    if let Some(message) = message {
        engine.commit(repo, message).await?;
        println!("Committed {name}");
    }
    Ok(())
}

/// Commits the index.
///
/// # Errors
///
/// Returns an error with git's output if the commit fails.
pub async fn run_commit_command(args: &CommitArgs, config: &Config) -> Result<()> {
    let repo = args.repo.path.as_path();
    engine(config).commit(repo, &args.message).await?;
    println!("Committed {}", repo_display_name(repo));
    Ok(())
}

/// Restores or deletes one file.
///
/// # Errors
///
/// Returns an error if the checkout or deletion fails.
pub async fn run_discard_command(args: &DiscardArgs, config: &Config) -> Result<()> {
    engine(config)
        .discard_file(&args.repo.path, &args.file, args.is_new)
        .await?;
    println!("Discarded {}", args.file);
    Ok(())
}

/// Applies a discard patch to the working tree, or builds one from
/// selected lines of a diff.
///
/// # Errors
///
/// Returns an error if nothing is selected or git cannot apply the patch.
pub async fn run_discard_lines_command(args: &DiscardLinesArgs, config: &Config) -> Result<()> {
    let PatchInput { patch, select } = &args.input;
    let Some(patch_path) = patch else {
        bail!("nothing to discard: pass --patch FILE");
    };
    let text = read_patch(patch_path)?;

    let reverse = if select.is_empty() {
        text
    } else {
        let entries = select_files(&text, &patch_path.display().to_string(), select)?;
        entries
            .iter()
            .filter_map(|e| format_discard_patch(&e.file, &e.selection))
            .collect::<String>()
    };
    if reverse.trim().is_empty() {
        return Err(PatchError::NothingSelected.into());
    }

    engine(config).discard_lines(&args.repo.path, &reverse).await?;
    println!("Discarded lines in {}", repo_display_name(&args.repo.path));
    Ok(())
}
