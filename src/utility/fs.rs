// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Small JSON files on disk.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::Path;
use tracing::{debug, trace};

use crate::error::{MultiResult, StoreError};

/// Reads `path` as JSON; a missing or malformed file yields `T::default()`.
#[must_use]
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    read_json(path).unwrap_or_default()
}

/// Reads `path` as JSON; `None` if it is missing or malformed.
#[must_use]
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let text = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "ignoring malformed json");
            None
        }
    }
}

/// Writes `value` as pretty JSON, creating parent directories.
///
/// The content goes to a temporary file next to `path` first and is then
/// renamed over it, so readers never observe a partial file.
///
/// # Errors
///
/// Returns a `StoreError` if serialization, directory creation or the write
/// fails.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> MultiResult<()> {
    let write_err = |source: std::io::Error| StoreError::Write {
        path: path.display().to_string(),
        source,
    };

    let json = serde_json::to_string_pretty(value).map_err(StoreError::Serialize)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(json.as_bytes()).map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;
    trace!(path = %path.display(), bytes = json.len(), "wrote json");
    Ok(())
}
