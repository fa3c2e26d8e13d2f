//! External program execution with bounded waiting.

pub mod command;

pub use command::{execute, execute_quiet, CommandOptions, CommandResult};
