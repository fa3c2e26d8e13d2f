//! Non-interactive UI for pipes and status lines.

use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation used when stdout is not a terminal.
///
/// Output is plain text without colors. Spinners are silent.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn info(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("ℹ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(NoopSpinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("{}", title);
        }
    }
}

/// Spinner that does nothing.
struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn finish_clear(&mut self) {}
}
