// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Repos | Status | Diff | History | Stage | Push | Message | ...
//! ```

use std::process::ExitCode;

use multi_rs::cli::global::GlobalOptions;
use multi_rs::cli::{self, Command};
use multi_rs::cmd::change::{
    run_commit_command, run_discard_command, run_discard_lines_command, run_stage_command,
};
use multi_rs::cmd::config::{run_configs_command, run_options_command};
use multi_rs::cmd::message::{run_message_command, run_settings_command};
use multi_rs::cmd::repos::run_repos_command;
use multi_rs::cmd::sync::{run_publish_command, run_push_command, run_web_command};
use multi_rs::cmd::view::{
    run_diff_command, run_history_command, run_show_command, run_status_command,
    run_subrepos_command,
};
use multi_rs::config::Config;
use multi_rs::error::Result;
use multi_rs::logging::init_logging;
use multi_rs::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();
    let config = load_config(&cli.global);

    let log_config = build_log_config(config.as_ref().ok(), &cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, config).await
}

/// Logging follows the loaded configuration; when it failed to load, the
/// raw command-line flags are used so the failure itself is still logged.
fn build_log_config(config: Option<&Config>, global: &GlobalOptions) -> LogConfig {
    if let Some(config) = config {
        return LogConfig::from(&config.global);
    }

    let console = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);
    let file = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console);
    LogConfig::builder()
        .with_console_level(console)
        .with_file_level(file)
        .maybe_with_log_file(global.log_file.clone())
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: Result<Config>) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Configs) => cli.global.config_loader().map(|loader| {
            run_configs_command(&loader.format_loaded_files());
        }),
        Some(command) => match config {
            Ok(config) => run_command(command, &config).await,
            Err(e) => Err(e.context("Failed to load config")),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run_command(command: &Command, config: &Config) -> Result<()> {
    match command {
        Command::Version | Command::Configs => Ok(()),
        Command::Options => {
            run_options_command(config);
            Ok(())
        }
        Command::Repos(args) => run_repos_command(args, config).await,
        Command::Status(args) => {
            run_status_command(args, config).await;
            Ok(())
        }
        Command::Subrepos(args) => {
            run_subrepos_command(args, config);
            Ok(())
        }
        Command::Diff(args) => {
            run_diff_command(args, config).await;
            Ok(())
        }
        Command::History(args) => {
            run_history_command(args, config).await;
            Ok(())
        }
        Command::Show(args) => run_show_command(args, config).await,
        Command::Stage(args) => run_stage_command(args, config).await,
        Command::Commit(args) => run_commit_command(args, config).await,
        Command::Discard(args) => run_discard_command(args, config).await,
        Command::DiscardLines(args) => run_discard_lines_command(args, config).await,
        Command::Push(args) => run_push_command(args, config).await,
        Command::Publish(args) => run_publish_command(args, config).await,
        Command::Message(args) => run_message_command(args, config).await,
        Command::Settings(args) => run_settings_command(args, config),
        Command::Web(args) => run_web_command(args, config).await,
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    let mut config = global.config_loader()?.build()?;
    config.resolve_and_validate()?;
    Ok(config)
}
