// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command execution capability.
//!
//! ```text
//! Invocation { program, args, cwd, timeout, stdin }
//!        |
//!        v
//! CommandRunner::run --> Ok(CommandOutput { stdout, stderr })
//!                    --> Err(GitError::CommandFailed { code, stdout, stderr })
//!                    --> Err(ProcessError::Timeout | SpawnFailed | ...)
//! ```

use futures_util::future::BoxFuture;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::error::{GitError, MultiResult};

/// External executable driven by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    Git,
    /// GitHub CLI, used only to create remotes.
    Gh,
}

impl Program {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Gh => "gh",
        }
    }
}

/// A single command to run in a repository directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: Program,
    args: Vec<String>,
    cwd: PathBuf,
    timeout: Duration,
    stdin: Option<String>,
}

impl Invocation {
    /// Creates a `git` invocation with the default 30 s timeout.
    pub fn git<I, S>(cwd: impl AsRef<Path>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Program::Git, cwd, args)
    }

    /// Creates a `gh` invocation with the default 30 s timeout.
    pub fn gh<I, S>(cwd: impl AsRef<Path>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Program::Gh, cwd, args)
    }

    fn new<I, S>(program: Program, cwd: impl AsRef<Path>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program,
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.as_ref().to_path_buf(),
            timeout: Duration::from_secs(30),
            stdin: None,
        }
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Feeds `content` to the command's stdin.
    #[must_use]
    pub fn stdin(mut self, content: impl Into<String>) -> Self {
        self.stdin = Some(content.into());
        self
    }

    #[must_use]
    pub const fn program(&self) -> Program {
        self.program
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    #[must_use]
    pub const fn timeout_duration(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn stdin_content(&self) -> Option<&str> {
        self.stdin.as_deref()
    }

    /// `git status --porcelain` style rendering, used in errors and logs.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.program.as_str().to_string();
        for arg in &self.args {
            let _ = write!(line, " {arg}");
        }
        line
    }

    /// True if the arguments start with `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        self.args.len() >= prefix.len() && self.args.iter().zip(prefix).all(|(a, p)| a == p)
    }
}

/// Captured output of a successful command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    stdout: String,
    stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub const fn new(stdout: String, stderr: String) -> Self {
        Self { stdout, stderr }
    }

    /// Output with the given stdout and empty stderr.
    pub fn stdout_only(stdout: impl Into<String>) -> Self {
        Self::new(stdout.into(), String::new())
    }

    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub fn into_stdout(self) -> String {
        self.stdout
    }
}

/// Executes [`Invocation`]s.
///
/// A non-zero exit must be reported as [`GitError::CommandFailed`] carrying
/// the exit code, stdout and stderr.
pub trait CommandRunner: Send + Sync {
    fn run<'a>(&'a self, invocation: &'a Invocation) -> BoxFuture<'a, MultiResult<CommandOutput>>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run<'a>(&'a self, invocation: &'a Invocation) -> BoxFuture<'a, MultiResult<CommandOutput>> {
        (**self).run(invocation)
    }
}

/// Runs commands as child processes.
///
/// Credential helpers and terminal prompts are disabled so a network command
/// can never block on input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    async fn execute(&self, invocation: &Invocation) -> MultiResult<CommandOutput> {
        let mut builder = ProcessBuilder::which(invocation.program().as_str())?
            .name(invocation.program().as_str())
            .args(invocation.args())
            .cwd(invocation.cwd())
            .non_interactive()
            .timeout(invocation.timeout_duration())
            .flag(ProcessFlags::ALLOW_FAILURE)
            .capture_output();
        if let Some(stdin) = invocation.stdin_content() {
            builder = builder.stdin(stdin);
        }

        let output = builder.run().await?;
        let code = output.exit_code();
        let (stdout, stderr) = output.into_streams();
        if code == 0 {
            Ok(CommandOutput::new(stdout, stderr))
        } else {
            Err(GitError::CommandFailed {
                command: invocation.command_line(),
                code,
                stdout,
                stderr: stderr.trim().to_string(),
            }
            .into())
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run<'a>(&'a self, invocation: &'a Invocation) -> BoxFuture<'a, MultiResult<CommandOutput>> {
        Box::pin(self.execute(invocation))
    }
}
