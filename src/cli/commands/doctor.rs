//! Doctor command implementation.
//!
//! The `gm doctor` command reports on node, npm and the gm file locations.

use crate::config::Paths;
use crate::doctor::{has_errors, CheckStatus, Doctor};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The doctor command implementation.
pub struct DoctorCommand {
    paths: Paths,
    doctor: Doctor,
}

impl DoctorCommand {
    /// Create a doctor command using `node` and `npm` from `PATH`.
    pub fn new(paths: &Paths) -> Self {
        Self::with_doctor(paths, Doctor::default())
    }

    /// Create a doctor command with a configured [`Doctor`].
    pub fn with_doctor(paths: &Paths, doctor: Doctor) -> Self {
        Self {
            paths: paths.clone(),
            doctor,
        }
    }
}

impl Command for DoctorCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header("gm doctor");

        let checks = self.doctor.run(&self.paths);
        for check in &checks {
            let text = format!("{}: {}", check.name, check.detail);
            match check.status {
                CheckStatus::Ok => ui.success(&text),
                CheckStatus::Info => ui.info(&text),
                CheckStatus::Warn => ui.warning(&text),
                CheckStatus::Error => ui.error(&text),
            }
        }

        if has_errors(&checks) {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn paths_in(temp: &TempDir) -> Paths {
        let config = temp.path().join("config").join("packages.json");
        Paths::new(
            &config,
            vec![config.clone()],
            temp.path().join("cache").join("status.json"),
        )
    }

    #[test]
    fn missing_npm_fails() {
        let temp = TempDir::new().unwrap();
        let doctor = Doctor::with_programs("gm-test-no-such-node", "gm-test-no-such-npm");
        let mut ui = MockUI::new();

        let result = DoctorCommand::with_doctor(&paths_in(&temp), doctor)
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.headers(), &["gm doctor".to_string()]);
        assert!(ui.has_warning("Node.js version: node unknown"));
        assert!(ui.has_error("npm availability"));
        assert!(ui.has_success("Cache directory"));
        assert!(ui.infos()[0].contains("will be created when needed"));
    }
}
