// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of commands that change a working tree or index.
//!
//! # Line Selections
//!
//! ```text
//! --select src/app.rs=0,3,4   lines 0, 3 and 4 of src/app.rs
//! --select README.md=all      every line of README.md
//! ```
//!
//! Line indices are flat across a file's hunks, counting every line of the
//! patch file (context included). Files of the patch without a `--select`
//! are left alone.

use clap::Args;
use std::path::PathBuf;
use std::str::FromStr;

use super::view::RepoArgs;

/// Lines picked from one file of a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSelection {
    pub file: String,
    /// `None` selects every line.
    pub lines: Option<Vec<usize>>,
}

impl FromStr for LineSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (file, lines) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("expected FILE=LINES, got '{s}'"))?;
        let file = file.trim();
        if file.is_empty() {
            return Err(format!("missing file name in '{s}'"));
        }

        let lines = lines.trim();
        if lines.eq_ignore_ascii_case("all") {
            return Ok(Self {
                file: file.to_string(),
                lines: None,
            });
        }

        let indices = lines
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<usize>()
                    .map_err(|_| format!("invalid line index '{part}' in '{s}'"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            file: file.to_string(),
            lines: Some(indices),
        })
    }
}

/// A patch file and optional line selections from it.
#[derive(Debug, Clone, Args)]
pub struct PatchInput {
    /// Unified diff to apply.
    #[arg(short = 'p', long = "patch", value_name = "FILE")]
    pub patch: Option<PathBuf>,

    /// Applies only these lines of the patch (FILE=0,3,4 or FILE=all).
    /// Can be specified multiple times.
    #[arg(long = "select", value_name = "FILE=LINES", requires = "patch", action = clap::ArgAction::Append)]
    pub select: Vec<LineSelection>,
}

/// Arguments for `stage`.
#[derive(Debug, Clone, Args)]
pub struct StageArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    #[command(flatten)]
    pub input: PatchInput,

    /// Whole paths to stage.
    #[arg(long = "paths", value_name = "PATH", num_args = 1.., conflicts_with = "patch")]
    pub paths: Vec<String>,

    /// Commits the staged changes with this message.
    #[arg(short = 'm', long = "message", value_name = "MSG")]
    pub message: Option<String>,
}

/// Arguments for `commit`.
#[derive(Debug, Clone, Args)]
pub struct CommitArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Commit message.
    #[arg(short = 'm', long = "message", value_name = "MSG")]
    pub message: String,
}

/// Arguments for `discard`.
#[derive(Debug, Clone, Args)]
pub struct DiscardArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// File to restore, relative to the repository.
    #[arg(value_name = "FILE")]
    pub file: String,

    /// The file is untracked and is deleted instead.
    #[arg(long = "new")]
    pub is_new: bool,
}

/// Arguments for `discard-lines`.
#[derive(Debug, Clone, Args)]
pub struct DiscardLinesArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    #[command(flatten)]
    pub input: PatchInput,
}

/// Arguments for `message`.
#[derive(Debug, Clone, Args)]
pub struct MessageArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// One message per repository instead of one for the whole workspace.
    #[arg(long = "per-repo")]
    pub per_repo: bool,
}
