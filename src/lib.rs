//! Environment bootstrap engine.
//!
//! One-shot provisioning tool for a personal development environment:
//! installs developer tools (OS packages, GitHub release binaries, installer
//! scripts) and links dotfiles from the kit into `$HOME` — all driven by TOML
//! manifests in `conf/` and gated by per-step confirmation.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]** — parse and validate the TOML manifests
//! - **[`resources`]** — idempotent `check + apply` primitives (symlinks, packages, …)
//! - **[`steps`]** — named, confirmable units of work wired to resources
//! - **[`commands`]** — top-level subcommand orchestration (`provision`, `status`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod capability;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod net;
pub mod platform;
pub mod prompt;
pub mod resources;
pub mod steps;
