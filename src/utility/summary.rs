// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Capped summaries of partial batch failures.

/// How the tail of an over-long summary is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// One failure per line, then `...and K more.`
    Lines,
    /// Failures joined with ` | `, then ` (+K more)`
    Inline,
}

/// Failures collected while processing a batch, in occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchFailures {
    entries: Vec<String>,
}

impl BatchFailures {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Records `"{label}: {message}"`.
    pub fn push(&mut self, label: &str, message: &str) {
        self.entries.push(format!("{label}: {message}"));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The first `max_shown` failures and a count of the rest.
    #[must_use]
    pub fn render(&self, max_shown: usize, overflow: Overflow) -> String {
        let shown = &self.entries[..self.entries.len().min(max_shown)];
        let hidden = self.entries.len() - shown.len();
        match overflow {
            Overflow::Lines => {
                let mut out = shown.join("\n");
                if hidden > 0 {
                    out.push_str(&format!("\n...and {hidden} more."));
                }
                out
            }
            Overflow::Inline => {
                let mut out = shown.join(" | ");
                if hidden > 0 {
                    out.push_str(&format!(" (+{hidden} more)"));
                }
                out
            }
        }
    }
}

