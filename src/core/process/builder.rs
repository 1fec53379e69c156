// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process configuration.
//!
//! ```text
//! ProcessBuilder::which("git")        PATH lookup, cached per name
//!   .name("git")                      label in logs and errors
//!   .args([..]) .cwd(repo)
//!   .non_interactive()                no credential or terminal prompts
//!   .stdin(patch) .timeout(d)
//!   .flag(ALLOW_FAILURE)              non-zero exit is returned, not raised
//!   .capture_output()                 keep stdout/stderr, trace every line
//! ```

use bitflags::bitflags;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, PoisonError, RwLock};
use std::time::Duration;

use crate::error::ProcessError;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ProcessFlags: u8 {
        /// Hand back the output of a non-zero exit instead of failing.
        const ALLOW_FAILURE = 1;
    }
}

bitflags! {
    /// What happens to a captured stream.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StreamFlags: u8 {
        /// Every line goes to `trace!`.
        const FORWARD_TO_LOG = 1;
        /// The text is returned in [`ProcessOutput`].
        const KEEP_IN_STRING = 1 << 1;
    }
}

impl Default for StreamFlags {
    fn default() -> Self {
        Self::FORWARD_TO_LOG
    }
}

/// Environment that keeps git and its credential helpers from prompting.
const NON_INTERACTIVE_ENV: [(&str, &str); 2] =
    [("GIT_TERMINAL_PROMPT", "0"), ("GCM_INTERACTIVE", "never")];

fn resolved_programs() -> &'static RwLock<HashMap<String, PathBuf>> {
    static RESOLVED: OnceLock<RwLock<HashMap<String, PathBuf>>> = OnceLock::new();
    RESOLVED.get_or_init(RwLock::default)
}

/// Exit code and captured streams of a finished process.
///
/// Streams are decoded lossily as UTF-8 and keep their trailing newlines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl ProcessOutput {
    #[must_use]
    pub const fn new(exit_code: i32, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    /// `-1` when the process was killed by a signal.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// `(stdout, stderr)`
    #[must_use]
    pub fn into_streams(self) -> (String, String) {
        (self.stdout, self.stderr)
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// A child process to run once.
#[derive(Debug)]
pub struct ProcessBuilder {
    pub(super) program: PathBuf,
    pub(super) args: Vec<String>,
    pub(super) cwd: Option<PathBuf>,
    /// Added on top of the inherited environment.
    pub(super) env: Vec<(String, String)>,
    pub(super) flags: ProcessFlags,
    pub(super) stdout: StreamFlags,
    pub(super) stderr: StreamFlags,
    pub(super) stdin: Option<Vec<u8>>,
    pub(super) name: Option<String>,
    pub(super) timeout: Option<Duration>,
}

impl ProcessBuilder {
    /// A bare program name is resolved through PATH at spawn time.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
            flags: ProcessFlags::empty(),
            stdout: StreamFlags::default(),
            stderr: StreamFlags::default(),
            stdin: None,
            name: None,
            timeout: None,
        }
    }

    /// Resolves `program` through PATH first.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if it is not on PATH.
    pub fn which(program: &str) -> Result<Self, ProcessError> {
        Self::find(program)
            .map(Self::new)
            .ok_or_else(|| ProcessError::ExecutableNotFound {
                name: program.to_string(),
            })
    }

    /// Full path of `program`. Successful lookups are remembered.
    #[must_use]
    pub fn find(program: &str) -> Option<PathBuf> {
        let cached = resolved_programs()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(program)
            .cloned();
        if cached.is_some() {
            return cached;
        }

        let path = which::which(program).ok()?;
        resolved_programs()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(program.to_string(), path.clone());
        Some(path)
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_string()));
        self
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Disables terminal and credential-manager prompts.
    #[must_use]
    pub fn non_interactive(self) -> Self {
        NON_INTERACTIVE_ENV
            .iter()
            .fold(self, |builder, (key, value)| builder.env(*key, *value))
    }

    #[must_use]
    pub fn flag(mut self, flag: ProcessFlags) -> Self {
        self.flags |= flag;
        self
    }

    /// Keeps stdout and stderr and traces them line by line.
    #[must_use]
    pub fn capture_output(mut self) -> Self {
        let captured = StreamFlags::KEEP_IN_STRING | StreamFlags::FORWARD_TO_LOG;
        self.stdout = captured;
        self.stderr = captured;
        self
    }

    /// Without stdin content the child reads from the null device.
    #[must_use]
    pub fn stdin(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(content.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The child is killed once `duration` elapses.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }
}
