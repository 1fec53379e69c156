// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Unified diff parser.
//!
//! Accepts `git diff`, `git diff --cached`, `git diff --no-index` and
//! `git show` output as well as plain `---`/`+++` diffs. Hunk bodies are
//! consumed by their header counts, so content lines that look like
//! headers (`--- x`) are never misread.

use regex::Regex;
use std::sync::OnceLock;

use super::path::unquote;
use super::{DiffFile, DiffHunk, DiffLine, LineKind};

const DEV_NULL: &str = "/dev/null";

fn hunk_header_regex() -> Option<&'static Regex> {
    static HUNK_HEADER: OnceLock<Option<Regex>> = OnceLock::new();
    HUNK_HEADER
        .get_or_init(|| Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@ ?(.*)$").ok())
        .as_ref()
}

/// Parses `@@ -a,b +c,d @@ section` into an empty hunk.
fn parse_hunk_header(line: &str) -> Option<DiffHunk> {
    let caps = hunk_header_regex()?.captures(line)?;
    let num = |i: usize, default: u32| {
        caps.get(i)
            .map_or(Some(default), |m| m.as_str().parse::<u32>().ok())
    };
    Some(DiffHunk {
        old_start: num(1, 0)?,
        old_count: num(2, 1)?,
        new_start: num(3, 0)?,
        new_count: num(4, 1)?,
        section: caps.get(5).map_or("", |m| m.as_str()).trim().to_string(),
        lines: Vec::new(),
    })
}

/// Strips a trailing timestamp and quoting, leaving the path as written.
fn plain_path(raw: &str) -> Option<String> {
    let raw = raw.split('\t').next().unwrap_or(raw).trim();
    let path = unquote(raw);
    (path != DEV_NULL && !path.is_empty()).then_some(path)
}

/// [`plain_path`] without the `a/`/`b/` prefix of `---`/`+++` and header lines.
fn clean_path(raw: &str) -> Option<String> {
    let path = plain_path(raw)?;
    let stripped = path
        .strip_prefix("a/")
        .or_else(|| path.strip_prefix("b/"))
        .unwrap_or(&path);
    Some(stripped.to_string())
}

/// Byte length of the leading quoted token of `s`, quotes included.
fn quoted_len(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(1) {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(i + 1),
            _ => {}
        }
    }
    None
}

/// Splits `a/x b/y` from a `diff --git` line; either side may be quoted.
fn header_paths(rest: &str) -> (Option<String>, Option<String>) {
    if rest.starts_with('"') {
        return match quoted_len(rest) {
            Some(end) => (clean_path(&rest[..end]), clean_path(&rest[end..])),
            None => (None, None),
        };
    }
    match rest.rfind(" \"b/").or_else(|| rest.rfind(" b/")) {
        Some(split) => (clean_path(&rest[..split]), clean_path(&rest[split + 1..])),
        None => (None, None),
    }
}

struct Parser {
    files: Vec<DiffFile>,
    current: Option<DiffFile>,
    /// Remaining (old, new) lines of the open hunk.
    remaining: Option<(u32, u32)>,
    old_line: u32,
    new_line: u32,
}

impl Parser {
    const fn new() -> Self {
        Self {
            files: Vec::new(),
            current: None,
            remaining: None,
            old_line: 0,
            new_line: 0,
        }
    }

    fn start_file(&mut self, file: DiffFile) {
        self.finish_file();
        self.current = Some(file);
    }

    fn finish_file(&mut self) {
        self.remaining = None;
        if let Some(file) = self.current.take() {
            self.files.push(file);
        }
    }

    fn file(&mut self) -> &mut DiffFile {
        self.current.get_or_insert_with(DiffFile::default)
    }

    fn in_hunk(&self) -> bool {
        self.remaining.is_some_and(|(old, new)| old > 0 || new > 0)
    }

    fn hunk_line(&mut self, line: &str) {
        let (kind, content) = match line.as_bytes().first() {
            Some(b'+') => (LineKind::Add, &line[1..]),
            Some(b'-') => (LineKind::Delete, &line[1..]),
            Some(b' ') => (LineKind::Context, &line[1..]),
            // Some tools strip the space of empty context lines.
            _ => (LineKind::Context, line),
        };

        let (mut old_left, mut new_left) = self.remaining.unwrap_or((0, 0));
        let (old_number, new_number) = match kind {
            LineKind::Context => {
                old_left = old_left.saturating_sub(1);
                new_left = new_left.saturating_sub(1);
                self.old_line += 1;
                self.new_line += 1;
                (Some(self.old_line), Some(self.new_line))
            }
            LineKind::Add => {
                new_left = new_left.saturating_sub(1);
                self.new_line += 1;
                (None, Some(self.new_line))
            }
            LineKind::Delete => {
                old_left = old_left.saturating_sub(1);
                self.old_line += 1;
                (Some(self.old_line), None)
            }
        };
        self.remaining = Some((old_left, new_left));

        if let Some(hunk) = self.file().hunks.last_mut() {
            hunk.lines.push(DiffLine {
                kind,
                content: content.to_string(),
                old_number,
                new_number,
                no_newline: false,
            });
        }
    }

    fn mark_no_newline(&mut self) {
        if let Some(line) = self
            .current
            .as_mut()
            .and_then(|f| f.hunks.last_mut())
            .and_then(|h| h.lines.last_mut())
        {
            line.no_newline = true;
        }
    }

    fn header_line(&mut self, line: &str) {
        if let Some(rest) = line.strip_prefix("diff --git ") {
            let (old_path, new_path) = header_paths(rest);
            self.start_file(DiffFile {
                old_path,
                new_path,
                ..DiffFile::default()
            });
        } else if let Some(hunk) = parse_hunk_header(line) {
            self.old_line = hunk.old_start.saturating_sub(1);
            self.new_line = hunk.new_start.saturating_sub(1);
            // A zero-length side starts after the named line.
            if hunk.old_count == 0 {
                self.old_line = hunk.old_start;
            }
            if hunk.new_count == 0 {
                self.new_line = hunk.new_start;
            }
            self.remaining = Some((hunk.old_count, hunk.new_count));
            self.file().hunks.push(hunk);
        } else if let Some(rest) = line.strip_prefix("--- ") {
            // Plain diffs have no `diff --git` line; a second `---` opens a new file.
            if self.current.as_ref().is_none_or(|f| !f.hunks.is_empty()) {
                self.start_file(DiffFile::default());
            }
            let path = clean_path(rest);
            let file = self.file();
            if path.is_none() {
                file.is_new = true;
            }
            file.old_path = path;
        } else if let Some(rest) = line.strip_prefix("+++ ") {
            let path = clean_path(rest);
            let file = self.file();
            if path.is_none() {
                file.is_deleted = true;
            }
            file.new_path = path;
        } else if let Some(mode) = line.strip_prefix("new file mode ") {
            let file = self.file();
            file.is_new = true;
            file.old_path = None;
            file.new_mode = Some(mode.trim().to_string());
        } else if let Some(mode) = line.strip_prefix("deleted file mode ") {
            let file = self.file();
            file.is_deleted = true;
            file.new_path = None;
            file.old_mode = Some(mode.trim().to_string());
        } else if let Some(mode) = line.strip_prefix("old mode ") {
            self.file().old_mode = Some(mode.trim().to_string());
        } else if let Some(mode) = line.strip_prefix("new mode ") {
            self.file().new_mode = Some(mode.trim().to_string());
        } else if let Some(path) = line.strip_prefix("rename from ") {
            let file = self.file();
            file.is_rename = true;
            file.old_path = plain_path(path);
        } else if let Some(path) = line.strip_prefix("rename to ") {
            let file = self.file();
            file.is_rename = true;
            file.new_path = plain_path(path);
        } else if let Some(path) = line.strip_prefix("copy from ") {
            let file = self.file();
            file.is_copy = true;
            file.old_path = plain_path(path);
        } else if let Some(path) = line.strip_prefix("copy to ") {
            let file = self.file();
            file.is_copy = true;
            file.new_path = plain_path(path);
        } else if line.starts_with("Binary files ") || line.starts_with("GIT binary patch") {
            self.file().is_binary = true;
        }
        // `index`, `similarity index` and anything unrecognised are skipped.
    }
}

/// Parses unified diff text into file sections.
#[must_use]
pub fn parse_diff(text: &str) -> Vec<DiffFile> {
    let mut parser = Parser::new();
    for line in text.split('\n') {
        if line.starts_with('\\') {
            parser.mark_no_newline();
        } else if parser.in_hunk() {
            parser.hunk_line(line);
        } else {
            parser.header_line(line);
        }
    }
    parser.finish_file();
    parser.files
}
