// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          repos / view / change / sync
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, env, --set        |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!               git         store      ai
//!        status/diff/     registry   commit
//!        history/push     settings   messages
//!                 |
//!                 v
//!               patch
//!        parse / select / format
//!
//!   +-----------------------------------------+
//!   |  core   process (spawn, timeout, stdin) |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod ai;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod patch;
pub mod store;
pub mod utility;
