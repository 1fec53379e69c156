// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers --> GitEngine<ShellRunner> / stores / ai
//!   config    options, configs
//!   repos     registry list/add/remove
//!   view      status, subrepos, diff, history, show
//!   change    stage, commit, discard, discard-lines
//!   sync      push, publish, web
//!   message   message, settings
//! ```

pub mod change;
pub mod config;
pub mod message;
pub mod repos;
pub mod sync;
pub mod view;

#[cfg(test)]
mod tests;

use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use crate::config::Config;
use crate::git::{GitEngine, GitSettings, ShellRunner};

/// Engine over real `git`/`gh` processes with the configured tunables.
#[must_use]
pub fn engine(config: &Config) -> GitEngine<ShellRunner> {
    GitEngine::shell(GitSettings::from(config))
}

/// The workspace root followed by its declared sub-repositories.
pub(crate) fn workspace_paths<R: crate::git::CommandRunner>(
    engine: &GitEngine<R>,
    root: &Path,
) -> Vec<PathBuf> {
    let subs = engine.discover_sub_repos(root).unwrap_or_default();
    std::iter::once(root.to_path_buf())
        .chain(subs.into_iter().map(|sub| sub.path))
        .collect()
}

fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        })
        .clone()
}

/// Spinner on stderr for long network operations.
pub(crate) fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(spinner_style());
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
