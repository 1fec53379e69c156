// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for multi-rs using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! multi [global options] <command>
//! version | options | configs
//! repos {list|add|remove}
//! status | subrepos | diff [--combined]
//! history [--limit N] | show --group ID
//! stage | commit | discard | discard-lines
//! push [--create-missing] | publish | web
//! message [--per-repo]
//! settings {set-key|show}
//! ```

pub mod change;
pub mod global;
pub mod repos;
pub mod settings;
pub mod sync;
pub mod view;

use crate::cli::change::{CommitArgs, DiscardArgs, DiscardLinesArgs, MessageArgs, StageArgs};
use crate::cli::global::GlobalOptions;
use crate::cli::repos::ReposArgs;
use crate::cli::settings::SettingsArgs;
use crate::cli::sync::PushArgs;
use crate::cli::view::{DiffArgs, HistoryArgs, RepoArgs, ShowArgs};
use clap::{Parser, Subcommand};

/// Multi-repository workspace status, history and partial staging.
#[derive(Debug, Parser)]
#[command(
    name = "multi",
    author,
    version,
    about = "Multi-repository workspace engine",
    long_about = "multi-rs Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Tracks a set of root repositories, each optionally declaring\n\
                  sub-repositories in a `multi.json` manifest, and shows their\n\
                  combined status, diffs and history. Changes can be staged\n\
                  line by line, committed, discarded and pushed.",
    after_help = "CONFIG FILES:\n\n\
                  multi reads `multi.toml` from the current directory if present,\n\
                  then every --config file in order. MULTI_SECTION__KEY environment\n\
                  variables and --set section/key=value override both."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the configuration files used.
    Configs,

    /// Manages the repository registry.
    Repos(ReposArgs),

    /// Shows the aggregate status of a workspace.
    Status(RepoArgs),

    /// Lists the sub-repositories declared by a workspace.
    Subrepos(RepoArgs),

    /// Prints unstaged, staged and untracked changes.
    Diff(DiffArgs),

    /// Lists commits of a workspace grouped by time.
    History(HistoryArgs),

    /// Prints the diff of one history group.
    Show(ShowArgs),

    /// Stages a patch, selected lines of it, or whole paths.
    Stage(StageArgs),

    /// Commits the index.
    Commit(CommitArgs),

    /// Restores a file from the index, or deletes an untracked one.
    Discard(DiscardArgs),

    /// Reverts lines of the working tree.
    #[command(name = "discard-lines")]
    DiscardLines(DiscardLinesArgs),

    /// Pushes the workspace root and its sub-repositories.
    Push(PushArgs),

    /// Creates a private GitHub repository if needed and pushes.
    Publish(RepoArgs),

    /// Generates a commit message for the current changes.
    Message(MessageArgs),

    /// Manages local settings.
    Settings(SettingsArgs),

    /// Prints the GitHub web URL of a repository.
    Web(RepoArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
