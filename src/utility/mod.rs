// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   read_json_or_default()  missing/malformed --> Default
//!   write_json_atomic()     tempfile in target dir, then persist
//! summary
//!   BatchFailures           "first N of M, +K more"
//! ```

pub mod fs;
pub mod summary;

#[cfg(test)]
mod tests;
