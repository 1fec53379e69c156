// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Spawning and exit-code handling.
//!
//! ```text
//! run()
//!   command() --> spawn() --> run_child()  (io.rs)
//!                                |
//!              exit 0 or ALLOW_FAILURE? --no--> ProcessError::Failed
//!                                |
//!                                v
//!                          ProcessOutput
//! ```

use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{MultiResult, ProcessError};

impl ProcessBuilder {
    /// Label used in logs: the explicit name, else the program's file stem.
    pub(super) fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.program
            .file_stem()
            .map_or_else(|| "process".to_string(), |s| s.to_string_lossy().into_owned())
    }

    /// Command line for logs and error messages; arguments with spaces are
    /// quoted.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.display_name())
            .chain(self.args.iter().map(|arg| {
                if arg.contains(' ') {
                    format!("\"{arg}\"")
                } else {
                    arg.clone()
                }
            }))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the process to completion.
    ///
    /// # Errors
    ///
    /// - `ProcessError::SpawnFailed` if the child cannot be started.
    /// - `ProcessError::Timeout` once the timeout elapses; the child is killed.
    /// - `ProcessError::Failed` on a non-zero exit without `ALLOW_FAILURE`.
    pub async fn run(mut self) -> MultiResult<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();
        debug!(cwd = ?self.cwd, cmd = %cmd_line, "exec");

        let mut child = self
            .command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;
        trace!(process = %name, pid = ?child.id(), "spawned");

        let stdin = self.stdin.take();
        let output = self.run_child(&name, &cmd_line, &mut child, stdin).await?;
        trace!(process = %name, exit_code = output.exit_code(), "completed");

        if output.success() || self.flags.contains(ProcessFlags::ALLOW_FAILURE) {
            Ok(output)
        } else {
            Err(ProcessError::Failed {
                command: cmd_line,
                code: output.exit_code(),
                stderr: output.stderr().trim().to_string(),
            }
            .into())
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(if self.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        command
    }
}
