// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Unified diff model, line selection and patch generation.
//!
//! ```text
//! parse_diff(text) --> Vec<DiffFile>
//!                         |
//!     DiffFile { old_path, new_path, flags, hunks: [DiffHunk { lines }] }
//!                         |
//!          line index = flat position across all hunks of the file
//!                         |
//!   DiffSelection (all / none / explicit toggles)
//!          |                              |
//!          v                              v
//!   format_patch(file, sel, is_new)   format_discard_patch(file, sel)
//!   index-side, `git apply --cached`  worktree-side, `git apply`
//!          |                              |
//!          '------ Option<String> --------'
//!          None: binary, no hunks, nothing selected
//! ```

mod format;
mod parse;
mod path;
mod selection;


pub use format::{format_discard_patch, format_patch};
pub use parse::parse_diff;
pub use selection::{DiffSelection, SelectionType};

use serde::Serialize;
use std::fmt;

/// Kind of a line inside a hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Context,
    Add,
    Delete,
}

impl LineKind {
    /// Additions and deletions can be selected; context cannot.
    #[must_use]
    pub const fn is_change(self) -> bool {
        matches!(self, Self::Add | Self::Delete)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    pub kind: LineKind,
    /// Text without the leading ` `, `+` or `-`.
    pub content: String,
    pub old_number: Option<u32>,
    pub new_number: Option<u32>,
    /// Followed by `\ No newline at end of file`.
    pub no_newline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffHunk {
    pub old_start: u32,
    pub old_count: u32,
    pub new_start: u32,
    pub new_count: u32,
    /// Text after the closing `@@`, usually the enclosing function.
    pub section: String,
    pub lines: Vec<DiffLine>,
}

/// How a file changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Deleted,
    Renamed,
    Copied,
    Modified,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Added => "added",
            Self::Deleted => "deleted",
            Self::Renamed => "renamed",
            Self::Copied => "copied",
            Self::Modified => "modified",
        })
    }
}

/// One file section of a unified diff.
///
/// Paths are repository-relative with the `a/` and `b/` prefixes removed;
/// `None` stands for `/dev/null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffFile {
    pub old_path: Option<String>,
    pub new_path: Option<String>,
    pub is_new: bool,
    pub is_deleted: bool,
    pub is_rename: bool,
    pub is_copy: bool,
    pub is_binary: bool,
    pub old_mode: Option<String>,
    pub new_mode: Option<String>,
    pub hunks: Vec<DiffHunk>,
}

impl DiffFile {
    /// Path shown to users: the new path, or the old one for deletions.
    #[must_use]
    pub fn display_path(&self) -> &str {
        let path = if self.is_deleted {
            self.old_path.as_ref().or(self.new_path.as_ref())
        } else {
            self.new_path.as_ref().or(self.old_path.as_ref())
        };
        path.map_or("", String::as_str)
    }

    #[must_use]
    pub const fn status(&self) -> FileStatus {
        if self.is_new {
            FileStatus::Added
        } else if self.is_deleted {
            FileStatus::Deleted
        } else if self.is_rename {
            FileStatus::Renamed
        } else if self.is_copy {
            FileStatus::Copied
        } else {
            FileStatus::Modified
        }
    }

    /// All hunk lines with their flat index.
    pub fn indexed_lines(&self) -> impl Iterator<Item = (usize, &DiffLine)> {
        self.hunks.iter().flat_map(|h| h.lines.iter()).enumerate()
    }

    /// Flat indices of additions and deletions.
    pub fn selectable_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.indexed_lines()
            .filter(|(_, line)| line.kind.is_change())
            .map(|(idx, _)| idx)
    }

    /// Paths to hand to `git add` when no line patch can express the change.
    #[must_use]
    pub fn stage_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = Vec::new();
        for path in [&self.old_path, &self.new_path].into_iter().flatten() {
            if !paths.contains(path) {
                paths.push(path.clone());
            }
        }
        if paths.is_empty() && !self.display_path().is_empty() {
            paths.push(self.display_path().to_string());
        }
        paths
    }

    /// One-line description for selections that have no textual patch.
    #[must_use]
    pub fn describe_unpatchable(&self) -> String {
        match (&self.old_path, &self.new_path) {
            (Some(old), Some(new)) if self.is_rename && old != new => {
                format!("- renamed: {old} -> {new}")
            }
            _ if self.is_binary => format!("- {}: {} (binary)", self.status(), self.display_path()),
            _ => format!("- {}: {}", self.status(), self.display_path()),
        }
    }
}
