//! Packages command implementation.
//!
//! The `gm packages` command shows and edits the tracked package list.

use crate::cli::args::PackagesAction;
use crate::config::{load_packages, load_packages_for_editing, normalize_names, write_packages, Paths};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The packages command implementation.
pub struct PackagesCommand {
    paths: Paths,
    action: PackagesAction,
}

impl PackagesCommand {
    /// Create a new packages command.
    pub fn new(paths: &Paths, action: PackagesAction) -> Self {
        Self {
            paths: paths.clone(),
            action,
        }
    }

    fn list(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let packages = load_packages(&self.paths);
        if packages.is_empty() {
            ui.info(&format!(
                "No packages tracked. Add one with `gm packages add <name>` or edit {}",
                self.paths.config().display()
            ));
            return Ok(CommandResult::success());
        }

        for name in &packages {
            ui.line(name);
        }
        Ok(CommandResult::success())
    }

    fn add(&self, names: &[String], ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut editable = load_packages_for_editing(&self.paths)?;
        let mut changed = false;

        for name in normalize_names(names) {
            if editable.packages.contains(&name) {
                ui.warning(&format!("{} is already tracked", name));
                continue;
            }
            ui.success(&format!("Tracking {}", name));
            editable.packages.push(name);
            changed = true;
        }

        if changed {
            write_packages(&editable.config_path, &editable.packages)?;
        }
        Ok(CommandResult::success())
    }

    fn remove(&self, names: &[String], ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut editable = load_packages_for_editing(&self.paths)?;
        let mut changed = false;

        for name in normalize_names(names) {
            let before = editable.packages.len();
            editable.packages.retain(|p| p != &name);
            if editable.packages.len() == before {
                ui.warning(&format!("{} is not tracked", name));
                continue;
            }
            ui.success(&format!("Stopped tracking {}", name));
            changed = true;
        }

        if changed {
            write_packages(&editable.config_path, &editable.packages)?;
        }
        Ok(CommandResult::success())
    }
}

impl Command for PackagesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.action {
            PackagesAction::List => self.list(ui),
            PackagesAction::Add { names } => self.add(names, ui),
            PackagesAction::Remove { names } => self.remove(names, ui),
            PackagesAction::Path => {
                ui.line(&self.paths.config().display().to_string());
                Ok(CommandResult::success())
            }
        }
    }
}
