//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{CheckArgs, Cli, Commands};
use crate::config::Paths;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: u8,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: u8) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    paths: Paths,
}

impl CommandDispatcher {
    /// Create a new dispatcher with resolved paths.
    pub fn new(paths: Paths) -> Self {
        Self { paths }
    }

    /// Dispatch and execute a command.
    ///
    /// Running `gm` without a subcommand checks for updates.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Check(args)) => {
                let cmd = super::check::CheckCommand::new(&self.paths, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Message(args)) => {
                let cmd = super::message::MessageCommand::new(&self.paths, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Packages(args)) => {
                let cmd = super::packages::PackagesCommand::new(&self.paths, args.action.clone());
                cmd.execute(ui)
            }
            Some(Commands::Doctor) => {
                let cmd = super::doctor::DoctorCommand::new(&self.paths);
                cmd.execute(ui)
            }
            Some(Commands::Usage(args)) => {
                let cmd = super::usage::UsageCommand::new(args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd = super::check::CheckCommand::new(&self.paths, CheckArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
