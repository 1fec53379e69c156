// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core process management.
//!
//! ```text
//!        core
//!          |
//!          v
//!       process
//!          |
//!   Builder -> Output
//!   timeout, stdin, env
//! ```

pub mod process;
