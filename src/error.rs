//! Error types for gm operations.
//!
//! This module defines [`GmError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - External tool failures are degraded at the probe boundary and never
//!   reach this type (see [`crate::registry`])
//! - Use `GmError` for failures a command needs to report distinctly
//! - Use `anyhow::Error` (via `GmError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for gm operations.
#[derive(Debug, Error)]
pub enum GmError {
    /// The tracked package list exists but cannot be read for editing.
    #[error("failed to read {path}: {message}")]
    ConfigRead { path: PathBuf, message: String },

    /// No tracked packages could be loaded from any candidate path.
    #[error("no packages configured. Create {path} or set GM_CONFIG.")]
    NoPackages { path: PathBuf },

    /// An external program could not be started.
    #[error("failed to run {program}: {message}")]
    CommandSpawn { program: String, message: String },

    /// The collection run failed before producing per-package data.
    #[error("status collection failed: {message}")]
    CollectionFailed { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error wrapper.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for gm operations.
pub type Result<T> = std::result::Result<T, GmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_read_displays_path_and_message() {
        let err = GmError::ConfigRead {
            path: PathBuf::from("/home/me/.config/gm/packages.json"),
            message: "packages file must contain a JSON array".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/home/me/.config/gm/packages.json"));
        assert!(msg.contains("must contain a JSON array"));
    }

    #[test]
    fn no_packages_mentions_override_variable() {
        let err = GmError::NoPackages {
            path: PathBuf::from("/cfg/packages.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/cfg/packages.json"));
        assert!(msg.contains("GM_CONFIG"));
    }

    #[test]
    fn command_spawn_displays_program() {
        let err = GmError::CommandSpawn {
            program: "npm".into(),
            message: "No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("npm"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn collection_failed_displays_message() {
        let err = GmError::CollectionFailed {
            message: "worker panicked".into(),
        };
        assert!(err.to_string().contains("worker panicked"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: GmError = io_err.into();
        assert!(matches!(err, GmError::Io(_)));
    }

    #[test]
    fn json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: GmError = json_err.into();
        assert!(matches!(err, GmError::Json(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(GmError::CollectionFailed {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
