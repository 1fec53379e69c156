// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings command arguments.

use clap::{Args, Subcommand};

/// Arguments for the `settings` command.
#[derive(Debug, Clone, Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub subcommand: SettingsSubcommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum SettingsSubcommand {
    /// Stores the OpenAI API key (blank clears it).
    #[command(name = "set-key")]
    SetKey {
        #[arg(value_name = "KEY", env = "OPENAI_API_KEY", hide_env_values = true)]
        key: String,
    },

    /// Prints the settings file location and whether a key is stored.
    Show,
}
