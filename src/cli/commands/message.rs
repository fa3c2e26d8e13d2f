//! Message command implementation.
//!
//! The `gm message` command prints the one-line summary of the status cache.
//! It never touches the network and always exits 0, so it is safe to call
//! from shell prompts and session hooks.

use std::path::PathBuf;

use crate::cli::args::MessageArgs;
use crate::config::Paths;
use crate::error::Result;
use crate::status::{render, RenderOptions, StatusCache};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

const PREFIX: &str = "[gm] ";

/// The message command implementation.
pub struct MessageCommand {
    cache_path: PathBuf,
    args: MessageArgs,
}

impl MessageCommand {
    /// Create a new message command.
    pub fn new(paths: &Paths, args: MessageArgs) -> Self {
        let cache_path = args
            .cache_path
            .clone()
            .unwrap_or_else(|| paths.cache().to_path_buf());
        Self { cache_path, args }
    }
}

impl Command for MessageCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = StatusCache::new(&self.cache_path).read();
        let options = RenderOptions {
            quiet_when_none: self.args.quiet_when_none,
            verbose: ui.output_mode().is_verbose(),
        };

        for line in render(report.as_ref(), options) {
            if self.args.no_prefix {
                ui.line(&line);
            } else {
                ui.line(&format!("{}{}", PREFIX, line));
            }
        }

        Ok(CommandResult::success())
    }
}
