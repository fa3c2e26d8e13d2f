//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`gm check`, `gm message`)
//! - Shared path resolution
//! - Consistent global flag handling

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod doctor;
pub mod message;
pub mod packages;
pub mod usage;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
