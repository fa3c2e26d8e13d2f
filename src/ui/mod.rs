//! Terminal user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for pipes, prompts and status lines
//! - [`MockUI`] for tests
//! - Spinners, themes and fixed-width tables
//!
//! # Example
//!
//! ```
//! use gm::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.success("Hidden in quiet mode");
//! ui.line("[gm] all set");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use table::{Align, Cell, Column, Table};
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, GmTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Print a line of command output to stdout, in every mode.
    fn line(&mut self, text: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display an informational note.
    fn info(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Always shown, on stderr.
    fn error(&mut self, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Remove the spinner without leaving a line behind.
    fn finish_clear(&mut self);
}
