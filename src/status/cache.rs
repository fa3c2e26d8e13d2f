//! Status report persistence.

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use super::record::StatusReport;
use crate::error::Result;

/// JSON file holding the most recent [`StatusReport`].
///
/// Each write replaces the previous report. Writes are plain overwrites;
/// concurrent collectors race and the last one wins.
#[derive(Debug, Clone)]
pub struct StatusCache {
    path: PathBuf,
}

impl StatusCache {
    /// Create a cache backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `report`, creating parent directories as needed.
    pub fn write(&self, report: &StatusReport) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create cache directory {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string_pretty(report)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write status to {}", self.path.display()))?;

        tracing::debug!("Wrote status report to {}", self.path.display());
        Ok(())
    }

    /// Read the cached report.
    ///
    /// Returns `None` when the file is missing, unreadable, not JSON, or
    /// not shaped like a report.
    pub fn read(&self) -> Option<StatusReport> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("No status at {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::debug!("Ignoring malformed status at {}: {}", self.path.display(), e);
                None
            }
        }
    }
}
