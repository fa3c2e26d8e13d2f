//! Command-line interface for gm.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    CheckArgs, Cli, Commands, CompletionsArgs, MessageArgs, PackagesAction, PackagesArgs, UsageArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
