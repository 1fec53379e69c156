// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Patch generation from a line selection.
//!
//! ```text
//!                 selected        unselected
//! stage   add     +line           (dropped)
//!         delete  -line           " line" (kept as context)
//! discard add     -line           " line" (kept as context)
//!         delete  +line           (dropped)
//! ```
//!
//! Old-side positions come from the source hunk. New-side positions are
//! shifted by the net line change of the hunks emitted before, because
//! `git apply` uses them to locate each hunk in the partially patched image.

use std::fmt::Write as _;

use super::path::quote;
use super::selection::{DiffSelection, SelectionType};
use super::{DiffFile, DiffHunk, DiffLine, LineKind};

const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

#[derive(Default)]
struct HunkBuf {
    body: String,
    old_count: u32,
    new_count: u32,
    changed: bool,
}

impl HunkBuf {
    fn emit(&mut self, prefix: char, line: &DiffLine) {
        match prefix {
            ' ' => {
                self.old_count += 1;
                self.new_count += 1;
            }
            '-' => {
                self.old_count += 1;
                self.changed = true;
            }
            _ => {
                self.new_count += 1;
                self.changed = true;
            }
        }
        self.body.push(prefix);
        self.body.push_str(&line.content);
        self.body.push('\n');
        if line.no_newline {
            self.body.push_str(NO_NEWLINE_MARKER);
            self.body.push('\n');
        }
    }
}

/// New-side start for a hunk, following the unified diff convention that a
/// zero-length side names the line before the change.
fn shifted_start(old_start: u32, old_count: u32, new_count: u32, delta: i64) -> u32 {
    let base = i64::from(old_start) + delta;
    let start = if old_count == 0 && new_count > 0 {
        base + 1
    } else if new_count == 0 && old_count > 0 {
        base - 1
    } else {
        base
    };
    u32::try_from(start.max(0)).unwrap_or(u32::MAX)
}

/// Renders the selected hunks; `map` decides the prefix of each line.
fn render_hunks(
    file: &DiffFile,
    old_start_of: impl Fn(&DiffHunk) -> u32,
    map: impl Fn(LineKind, bool) -> Option<char>,
    selection: &DiffSelection,
) -> Option<String> {
    let mut out = String::new();
    let mut delta: i64 = 0;
    let mut index = 0usize;

    for hunk in &file.hunks {
        let mut buf = HunkBuf::default();
        for line in &hunk.lines {
            if let Some(prefix) = map(line.kind, selection.is_selected(index)) {
                buf.emit(prefix, line);
            }
            index += 1;
        }
        if !buf.changed {
            continue;
        }

        let old_start = old_start_of(hunk);
        let new_start = shifted_start(old_start, buf.old_count, buf.new_count, delta);
        let _ = writeln!(
            out,
            "@@ -{old_start},{} +{new_start},{} @@",
            buf.old_count, buf.new_count
        );
        out.push_str(&buf.body);
        delta += i64::from(buf.new_count) - i64::from(buf.old_count);
    }

    (!out.is_empty()).then_some(out)
}

fn prefixed(prefix: &str, path: Option<&String>) -> String {
    path.map_or_else(|| "/dev/null".to_string(), |p| quote(&format!("{prefix}{p}")))
}

/// Builds a patch of the selected lines to apply to the index.
///
/// Returns `None` for binary files, files without hunks, and selections
/// containing no addition or deletion.
#[must_use]
pub fn format_patch(file: &DiffFile, selection: &DiffSelection, is_new: bool) -> Option<String> {
    if file.is_binary || file.hunks.is_empty() {
        return None;
    }

    let body = render_hunks(
        file,
        |hunk| hunk.old_start,
        |kind, selected| match (kind, selected) {
            (LineKind::Context, _) | (LineKind::Delete, false) => Some(' '),
            (LineKind::Delete, true) => Some('-'),
            (LineKind::Add, true) => Some('+'),
            (LineKind::Add, false) => None,
        },
        selection,
    )?;

    let from = if is_new {
        "/dev/null".to_string()
    } else {
        prefixed("a/", file.old_path.as_ref().or(file.new_path.as_ref()))
    };
    // A partially staged deletion leaves the file in place.
    let to = if file.is_deleted && selection.selection_type(file) == SelectionType::All {
        "/dev/null".to_string()
    } else {
        prefixed("b/", file.new_path.as_ref().or(file.old_path.as_ref()))
    };

    Some(format!("--- {from}\n+++ {to}\n{body}"))
}

/// Builds a patch that removes the selected changes from the working tree.
///
/// Returns `None` under the same conditions as [`format_patch`].
#[must_use]
pub fn format_discard_patch(file: &DiffFile, selection: &DiffSelection) -> Option<String> {
    if file.is_binary || file.hunks.is_empty() {
        return None;
    }

    let body = render_hunks(
        file,
        |hunk| hunk.new_start,
        |kind, selected| match (kind, selected) {
            (LineKind::Context, _) | (LineKind::Add, false) => Some(' '),
            (LineKind::Add, true) => Some('-'),
            (LineKind::Delete, true) => Some('+'),
            (LineKind::Delete, false) => None,
        },
        selection,
    )?;

    let path = Some(file.display_path().to_string());
    Some(format!(
        "--- {}\n+++ {}\n{body}",
        prefixed("a/", path.as_ref()),
        prefixed("b/", path.as_ref())
    ))
}
