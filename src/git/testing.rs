// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scripted [`CommandRunner`] for engine tests.

use futures_util::future::BoxFuture;
use std::path::Path;
use std::sync::Mutex;

use super::runner::{CommandOutput, CommandRunner, Invocation};
use super::{GitEngine, GitSettings};
use crate::error::{GitError, MultiError, MultiResult, ProcessError};

type Responder = Box<dyn Fn(&Invocation) -> MultiResult<CommandOutput> + Send + Sync>;

/// Answers every invocation through a closure and records what was run.
pub(crate) struct ScriptedRunner {
    responder: Responder,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub(crate) fn new(
        responder: impl Fn(&Invocation) -> MultiResult<CommandOutput> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Command lines run so far, e.g. `git status --porcelain`.
    pub(crate) fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(Invocation::command_line).collect()
    }

    pub(crate) fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run<'a>(&'a self, invocation: &'a Invocation) -> BoxFuture<'a, MultiResult<CommandOutput>> {
        self.calls.lock().unwrap().push(invocation.clone());
        let result = (self.responder)(invocation);
        Box::pin(async move { result })
    }
}

pub(crate) fn ok(stdout: &str) -> MultiResult<CommandOutput> {
    Ok(CommandOutput::stdout_only(stdout))
}

pub(crate) fn fail(invocation: &Invocation, code: i32, stdout: &str, stderr: &str) -> MultiResult<CommandOutput> {
    Err(MultiError::from(GitError::CommandFailed {
        command: invocation.command_line(),
        code,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }))
}

pub(crate) fn timeout(invocation: &Invocation) -> MultiResult<CommandOutput> {
    Err(MultiError::from(ProcessError::Timeout {
        command: invocation.command_line(),
        timeout_secs: invocation.timeout_duration().as_secs(),
    }))
}

pub(crate) fn engine(runner: &ScriptedRunner) -> GitEngine<&ScriptedRunner> {
    GitEngine::new(runner, GitSettings::default())
}

/// Creates `path` with an empty `.git` directory so presence checks pass.
pub(crate) fn fake_repo(path: &Path) {
    std::fs::create_dir_all(path.join(".git")).unwrap();
}
