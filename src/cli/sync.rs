// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote synchronization arguments.
//!
//! ```text
//! push PATH [--create-missing]   root + sub-repos, one after another
//! publish PATH                   gh repo create (if no origin) + push -u
//! web PATH                       https://github.com/OWNER/REPO
//! ```

use clap::Args;

use super::view::RepoArgs;

/// Arguments for `push`.
#[derive(Debug, Clone, Args)]
pub struct PushArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Creates a private GitHub repository for repos without a push destination.
    #[arg(long = "create-missing")]
    pub create_missing: bool,
}
