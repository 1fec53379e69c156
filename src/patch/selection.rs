// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Line selection within one diff file.

use std::collections::BTreeSet;

use super::DiffFile;

/// Aggregate state of a selection over a file's selectable lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionType {
    All,
    Partial,
    None,
}

/// Selected line indices, stored as a default plus the indices that differ
/// from it. Immutable: updates return a new selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSelection {
    default_selected: bool,
    divergent: BTreeSet<usize>,
}

impl DiffSelection {
    /// Every line selected.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            default_selected: true,
            divergent: BTreeSet::new(),
        }
    }

    /// No line selected.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            default_selected: false,
            divergent: BTreeSet::new(),
        }
    }

    /// Exactly the given indices selected.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        indices
            .into_iter()
            .fold(Self::none(), |sel, idx| sel.with_line_selection(idx, true))
    }

    /// Returns a copy with line `index` set to `selected`.
    #[must_use]
    pub fn with_line_selection(mut self, index: usize, selected: bool) -> Self {
        if selected == self.default_selected {
            self.divergent.remove(&index);
        } else {
            self.divergent.insert(index);
        }
        self
    }

    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.default_selected != self.divergent.contains(&index)
    }

    /// Classifies the selection over `file`'s additions and deletions.
    ///
    /// A file without selectable lines (binary, pure rename) reports the
    /// default.
    #[must_use]
    pub fn selection_type(&self, file: &DiffFile) -> SelectionType {
        let (total, selected) = file
            .selectable_indices()
            .fold((0usize, 0usize), |(total, selected), idx| {
                (total + 1, selected + usize::from(self.is_selected(idx)))
            });

        if total == 0 {
            if self.default_selected {
                SelectionType::All
            } else {
                SelectionType::None
            }
        } else if selected == total {
            SelectionType::All
        } else if selected == 0 {
            SelectionType::None
        } else {
            SelectionType::Partial
        }
    }
}

impl Default for DiffSelection {
    fn default() -> Self {
        Self::all()
    }
}
