// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Registry command arguments.
//!
//! ```text
//! repos list            → name, path, aggregate status, ahead/behind
//! repos add PATH        → append (absolute path)
//! repos remove PATH     → drop
//! ```

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments for the `repos` command.
#[derive(Debug, Clone, Args)]
pub struct ReposArgs {
    #[command(subcommand)]
    pub subcommand: ReposSubcommand,
}

/// Registry subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ReposSubcommand {
    /// Lists tracked repositories with their status.
    List,

    /// Starts tracking a repository.
    Add {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Stops tracking a repository.
    Remove {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}
