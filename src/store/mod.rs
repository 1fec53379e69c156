// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON-backed persistence.
//!
//! ```text
//! Registry        [ { "path": "/src/app" }, ... ]    ordered, unique paths
//! SettingsStore   { "openAIApiKey": "..." }          flat object
//! ```
//!
//! Both treat a missing or malformed file as empty. Writes are pretty JSON,
//! creating parent directories.

pub mod registry;
pub mod settings;

#[cfg(test)]
mod tests;

pub use registry::{Registry, RepoEntry};
pub use settings::{AppSettings, SettingsStore};
