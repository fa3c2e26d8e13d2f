//! Check command implementation.
//!
//! The `gm check` command probes the registry for every tracked package,
//! writes the status cache and prints which packages have updates.

use crate::cli::args::CheckArgs;
use crate::config::{load_packages, Paths};
use crate::error::{GmError, Result};
use crate::registry::{Npm, PackageManager};
use crate::status::{collect, collection_summary, StatusCache, StatusReport};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    paths: Paths,
    args: CheckArgs,
    manager: Box<dyn PackageManager>,
}

impl CheckCommand {
    /// Create a check command backed by npm.
    pub fn new(paths: &Paths, args: CheckArgs) -> Self {
        Self::with_manager(paths, args, Box::new(Npm::new()))
    }

    /// Create a check command backed by a specific package manager.
    pub fn with_manager(paths: &Paths, args: CheckArgs, manager: Box<dyn PackageManager>) -> Self {
        Self {
            paths: paths.clone(),
            args,
            manager,
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let names = load_packages(&self.paths);
        if names.is_empty() {
            let err = GmError::NoPackages {
                path: self.paths.config().to_path_buf(),
            };
            ui.error(&err.to_string());
            return Ok(CommandResult::failure(1));
        }

        let mut spinner = ui.start_spinner(&format!(
            "Checking {} package{}...",
            names.len(),
            if names.len() == 1 { "" } else { "s" }
        ));
        let outcome = collect(&names, self.manager.as_ref(), self.args.jobs);
        spinner.finish_clear();

        let (report, failed) = match outcome {
            Ok(report) => (report, false),
            Err(e) => {
                tracing::debug!("Collection failed: {:?}", e);
                (StatusReport::failed(e.to_string()), true)
            }
        };

        StatusCache::new(self.paths.cache()).write(&report)?;

        if let Some(error) = &report.error {
            ui.error(error);
        }
        for line in collection_summary(&report) {
            ui.line(&line);
        }

        if failed {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
