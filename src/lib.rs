//! gm - Global npm package update monitor.
//!
//! gm keeps an eye on a short list of globally installed npm packages. A
//! collector run (`gm check`) asks npm which versions are installed and
//! which are published, then writes a status cache. Cheap readers such as
//! `gm message` turn that cache into a one-line summary for shell prompts
//! and session hooks without touching the network.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Tracked package list and file locations
//! - [`doctor`] - Environment diagnostics
//! - [`error`] - Error types and result aliases
//! - [`registry`] - Installed and latest version lookups
//! - [`shell`] - External program execution
//! - [`status`] - Classification, the status cache and summaries
//! - [`ui`] - Terminal output, spinners and tables
//! - [`usage`] - Token and cost usage from `ccusage`
//!
//! # Example
//!
//! ```
//! use gm::status::{render, PackageStatusRecord, RenderOptions, StatusReport};
//!
//! let report = StatusReport::new(vec![PackageStatusRecord::classify(
//!     "typescript",
//!     Some("5.4.0".to_string()),
//!     Some("5.5.2".to_string()),
//! )]);
//! let lines = render(Some(&report), RenderOptions::default());
//! assert_eq!(lines, vec!["updates available: typescript 5.4.0 → 5.5.2"]);
//! ```

pub mod cli;
pub mod config;
pub mod doctor;
pub mod error;
pub mod registry;
pub mod shell;
pub mod status;
pub mod ui;
pub mod usage;

pub use error::{GmError, Result};
