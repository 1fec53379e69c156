// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Selection-driven staging and the diff text sent to message generation.
//!
//! ```text
//! per selected file:
//!   new + fully selected ------------> stage path
//!   format_patch(file, sel) = Some --> patch part
//!   None + fully selected ----------> stage old/new paths
//!   None + partial -----------------> nothing representable, skipped
//!
//! stage_and_commit: stage_patch(parts.concat()) -> stage_paths -> commit
//! ```

use std::path::Path;
use tracing::debug;

use super::{CommandRunner, GitEngine};
use crate::error::{AiError, MultiResult, PatchError};
use crate::patch::{DiffFile, DiffSelection, SelectionType, format_patch};

const UNPATCHABLE_HEADER: &str = "# Non-text or metadata-only selected changes";

/// A diff file and the lines picked from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    pub file: DiffFile,
    pub selection: DiffSelection,
}

impl FileSelection {
    #[must_use]
    pub const fn new(file: DiffFile, selection: DiffSelection) -> Self {
        Self { file, selection }
    }

    /// Every line of `file` selected.
    #[must_use]
    pub const fn all(file: DiffFile) -> Self {
        Self::new(file, DiffSelection::all())
    }

    fn selection_type(&self) -> SelectionType {
        self.selection.selection_type(&self.file)
    }
}

/// What to hand to git for a set of selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagePlan {
    /// Concatenated line patches for `git apply --cached`.
    pub patch: String,
    /// Whole paths for `git add`, deduplicated in first-seen order.
    pub paths: Vec<String>,
}

impl StagePlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patch.is_empty() && self.paths.is_empty()
    }

    fn add_path(&mut self, path: String) {
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }
}

/// Splits selections into a line patch and whole-path staging.
#[must_use]
pub fn plan_stage(entries: &[FileSelection]) -> StagePlan {
    let mut plan = StagePlan::default();
    for entry in entries {
        let selection_type = entry.selection_type();
        if selection_type == SelectionType::None {
            continue;
        }

        let file = &entry.file;
        if file.is_new && selection_type == SelectionType::All {
            plan.add_path(file.display_path().to_string());
            continue;
        }
        match format_patch(file, &entry.selection, file.is_new) {
            Some(patch) => plan.patch.push_str(&patch),
            None if selection_type == SelectionType::All => {
                for path in file.stage_paths() {
                    plan.add_path(path);
                }
            }
            None => debug!(file = file.display_path(), "partial selection has no patch"),
        }
    }
    plan
}

/// Selected changes of one repository as text for message generation.
///
/// Fully selected files without a textual patch are listed under a trailing
/// `# Non-text or metadata-only selected changes` section.
#[must_use]
pub fn selected_diff(entries: &[FileSelection]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut unpatchable: Vec<String> = Vec::new();
    for entry in entries {
        let selection_type = entry.selection_type();
        if selection_type == SelectionType::None {
            continue;
        }
        match format_patch(&entry.file, &entry.selection, entry.file.is_new) {
            Some(patch) => parts.push(patch),
            None if selection_type == SelectionType::All => {
                unpatchable.push(entry.file.describe_unpatchable());
            }
            None => {}
        }
    }

    if !unpatchable.is_empty() {
        unpatchable.insert(0, UNPATCHABLE_HEADER.to_string());
        parts.push(unpatchable.join("\n"));
    }
    parts.join("\n")
}

/// Selected diffs of several repositories as one text.
///
/// With more than one repository each part is headed by `# Repo: NAME`.
/// Repositories without selected changes are left out.
///
/// # Errors
///
/// Returns `AiError::EmptyDiff` when nothing is selected anywhere.
pub fn selected_diff_for_message(repos: &[(String, Vec<FileSelection>)]) -> MultiResult<String> {
    let labelled = repos.len() > 1;
    let parts: Vec<String> = repos
        .iter()
        .filter_map(|(name, entries)| {
            let diff = selected_diff(entries);
            if diff.trim().is_empty() {
                None
            } else if labelled {
                Some(format!("# Repo: {name}\n{diff}"))
            } else {
                Some(diff)
            }
        })
        .collect();

    let diff = parts.join("\n");
    if diff.trim().is_empty() {
        return Err(AiError::EmptyDiff.into());
    }
    Ok(diff)
}

impl<R: CommandRunner> GitEngine<R> {
    /// Stages the selected lines and files of one repository, then commits
    /// when `message` is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `PatchError::NothingSelected` if the selection stages nothing,
    /// or the first failing git step.
    pub async fn stage_and_commit(
        &self,
        repo: &Path,
        entries: &[FileSelection],
        message: Option<&str>,
    ) -> MultiResult<StagePlan> {
        let plan = plan_stage(entries);
        if plan.is_empty() {
            return Err(PatchError::NothingSelected.into());
        }

        if !plan.patch.is_empty() {
            self.stage_patch(repo, &plan.patch).await?;
        }
        self.stage_paths(repo, &plan.paths).await?;
        if let Some(message) = message.map(str::trim).filter(|m| !m.is_empty()) {
            self.commit(repo, message).await?;
        }
        Ok(plan)
    }
}
