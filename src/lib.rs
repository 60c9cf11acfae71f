//! Declarative dotfile deployer.
//!
//! Reads an INI profile describing groups of files and where each one should
//! live, validates it, then links or copies every file into place, optionally
//! backing up whatever it replaces.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: parse, interpolate and validate profiles
//! - **[`resources`]**: idempotent `check + apply` primitives (symlinks, copies, backups)
//! - **[`deploy`]**: plan and execute a deployment, producing a report
//! - **[`commands`]**: top-level subcommand orchestration (`validate`, `apply`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod deploy;
pub mod error;
pub mod logging;
pub mod operations;
pub mod paths;
pub mod resources;
