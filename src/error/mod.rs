// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              MultiError (~24 bytes)
//!                     |
//!   +------+------+------+------+------+------+------+
//!   |      |      |      |      |      |      |      |
//!   v      v      v      v      v      v      v      v
//!  Git  Process Config Store   Ai   Patch   Io   Other
//!  Box    Box    Box    Box   Box    Box   Box  Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Git     CommandFailed, NotARepository, RemoteCreateFailed, Gix
//!   Process SpawnFailed, Timeout, Failed, ExecutableNotFound
//!   Config  InvalidValue, ParseError
//!   Store   Read, Write, Serialize
//!   Ai      EmptyDiff, MissingApiKey, Http, EmptyResponse, Request
//!   Patch   NothingSelected, NoFiles
//! ```
//!
//! Expected absences (missing path, no upstream, no manifest) never reach
//! this module: they are encoded as data by the resolvers.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`MultiError`].
pub type MultiResult<T> = std::result::Result<T, MultiError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum MultiError {
    /// Git or `gh` command failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Registry or settings persistence error.
    #[error("store error: {0}")]
    Store(#[from] Box<StoreError>),

    /// Commit message generation error.
    #[error("{0}")]
    Ai(#[from] Box<AiError>),

    /// Line selection or patch input error.
    #[error("{0}")]
    Patch(#[from] Box<PatchError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

impl MultiError {
    /// Create a [`MultiError::Other`] from a message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into().into_boxed_str())
    }

    /// Returns the underlying git error, if any.
    #[must_use]
    pub fn as_git(&self) -> Option<&GitError> {
        match self {
            Self::Git(e) => Some(e),
            _ => None,
        }
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for MultiError {
                fn from(err: $error) -> Self {
                    MultiError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ProcessError => Process,
    ConfigError => Config,
    StoreError => Store,
    AiError => Ai,
    PatchError => Patch,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Command exited with a non-zero status.
    ///
    /// `stdout` is retained because some commands (`diff --no-index`) report
    /// their result through a non-zero exit.
    #[error("{command} failed (code {code}): {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    /// Path is missing or has no repository metadata.
    #[error("Repository path is missing or not a git repo: {path}")]
    NotARepository { path: String },

    /// `gh repo create` failed.
    #[error(
        "Failed to create private GitHub repo. Ensure gh CLI is installed and authenticated. {details}"
    )]
    RemoteCreateFailed { details: String },

    /// The `origin` remote does not point at GitHub.
    #[error("Repository origin is not a GitHub URL.")]
    NotGitHubRemote,

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),
}

impl GitError {
    /// Returns the captured stderr of a failed command, if any.
    #[must_use]
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process timed out and was killed.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// Process exited with a non-zero code.
    #[error("process '{command}' exited with code {code}: {stderr}")]
    Failed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// Failed to feed stdin or read process output.
    #[error("failed to communicate with process '{command}': {message}")]
    OutputError { command: String, message: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse a configuration override.
    #[error("failed to parse config override '{input}': {message}")]
    ParseError { input: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Store Errors ---

/// Errors from the JSON-backed registry and settings stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read a store file.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a store file.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize store contents.
    #[error("failed to serialize store contents: {0}")]
    Serialize(#[from] serde_json::Error),
}

// --- AI Errors ---

/// Commit message generation errors.
#[derive(Debug, Error)]
pub enum AiError {
    /// Nothing to summarize.
    #[error("No selected changes to summarize.")]
    EmptyDiff,

    /// No credential configured.
    #[error("OpenAI API key not set. Add it in Settings.")]
    MissingApiKey,

    /// Non-success HTTP response.
    #[error("OpenAI error ({status}): {body}")]
    Http { status: u16, body: String },

    /// The completion contained no usable line.
    #[error("OpenAI returned an empty commit message.")]
    EmptyResponse,

    /// Transport-level failure.
    #[error("OpenAI request failed: {0}")]
    Request(#[from] reqwest::Error),
}

// --- Patch Errors ---

/// Errors from selection-driven staging.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The selection contains no stageable change.
    #[error("No selected changes to stage.")]
    NothingSelected,

    /// Input text contained no file sections.
    #[error("no file sections found in diff '{source_name}'")]
    NoFiles { source_name: String },
}
