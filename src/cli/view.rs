// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only command arguments: status, sub-repositories, diffs, history.

use clap::Args;
use std::path::PathBuf;

/// A single workspace root.
#[derive(Debug, Clone, Args)]
pub struct RepoArgs {
    /// Workspace root.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,
}

/// Arguments for `diff`.
#[derive(Debug, Clone, Args)]
pub struct DiffArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Includes every sub-repository, each under a `# Repo: NAME` header.
    #[arg(long)]
    pub combined: bool,
}

/// Arguments for `history`.
#[derive(Debug, Clone, Args)]
pub struct HistoryArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Shows at most N groups.
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,
}

/// Arguments for `show`.
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// History group id, as printed by `history`.
    #[arg(short = 'g', long, value_name = "ID")]
    pub group: String,
}
