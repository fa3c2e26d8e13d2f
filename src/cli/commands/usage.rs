//! Usage command implementation.
//!
//! The `gm usage` command shows daily token and cost usage from `ccusage`
//! and `ccusage-codex`, once or as a refreshing dashboard.

use console::Term;
use std::time::Duration;

use crate::cli::args::UsageArgs;
use crate::error::Result;
use crate::ui::{GmTheme, UserInterface};
use crate::usage::{render_report, UsageSources, UsageWatch};

use super::dispatcher::{Command, CommandResult};

/// The usage command implementation.
pub struct UsageCommand {
    args: UsageArgs,
    sources: UsageSources,
}

impl UsageCommand {
    /// Create a usage command reading from the default tools.
    pub fn new(args: UsageArgs) -> Self {
        let sources = UsageSources::new(args.since.clone());
        Self::with_sources(args, sources)
    }

    /// Create a usage command reading from specific sources.
    pub fn with_sources(args: UsageArgs, sources: UsageSources) -> Self {
        Self { args, sources }
    }
}

impl Command for UsageCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let theme = GmTheme::detect();

        if self.args.watch {
            let watch = UsageWatch::new(self.sources.clone(), Duration::from_secs(self.args.interval));
            watch.run(&Term::stdout(), &theme)?;
            return Ok(CommandResult::success());
        }

        let mut spinner = ui.start_spinner("Fetching usage...");
        let snapshot = self.sources.fetch();
        spinner.finish_clear();

        for line in render_report(snapshot.claude.as_ref(), snapshot.codex.as_ref(), &theme) {
            ui.line(&line);
        }

        if snapshot.claude.is_none() && snapshot.codex.is_none() {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
