//! Tracked package list loading and editing.

use crate::error::{GmError, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::Paths;

/// A package list loaded for editing, together with where it will be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditablePackages {
    /// Path the edited list is written back to.
    pub config_path: PathBuf,
    /// Current normalized list.
    pub packages: Vec<String>,
}

/// Normalize a raw JSON package list.
///
/// Non-string entries are dropped, strings are trimmed, blanks are dropped
/// and duplicates collapse to their first occurrence. A non-array value
/// yields an empty list.
pub fn normalize_package_list(value: &Value) -> Vec<String> {
    match value.as_array() {
        Some(entries) => normalize_names(entries.iter().filter_map(Value::as_str)),
        None => Vec::new(),
    }
}

/// Trim, drop blanks and deduplicate, preserving first-occurrence order.
pub fn normalize_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();

    for name in names {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() || !seen.insert(trimmed.to_string()) {
            continue;
        }
        normalized.push(trimmed.to_string());
    }

    normalized
}

/// Load the tracked package list from the first usable candidate.
///
/// Missing, unreadable, malformed, non-array and empty candidates are
/// skipped. Returns an empty list when no candidate qualifies.
pub fn load_packages(paths: &Paths) -> Vec<String> {
    for candidate in paths.config_candidates() {
        if !candidate.exists() {
            continue;
        }

        let value = match read_json(candidate) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Skipping package list {}: {}", candidate.display(), e);
                continue;
            }
        };

        if !value.is_array() {
            tracing::warn!(
                "Skipping package list {}: not a JSON array",
                candidate.display()
            );
            continue;
        }

        let packages = normalize_package_list(&value);
        if packages.is_empty() {
            tracing::debug!("Package list {} is empty", candidate.display());
            continue;
        }

        tracing::debug!(
            "Loaded {} packages from {}",
            packages.len(),
            candidate.display()
        );
        return packages;
    }

    Vec::new()
}

/// Load the package list at the editable path.
///
/// When the editable file does not exist yet, the list seen by
/// [`load_packages`] is returned so an edit starts from what is tracked
/// today. An existing but unreadable or malformed file is an error.
pub fn load_packages_for_editing(paths: &Paths) -> Result<EditablePackages> {
    let config_path = paths.config().to_path_buf();

    if !config_path.exists() {
        return Ok(EditablePackages {
            packages: load_packages(paths),
            config_path,
        });
    }

    let value = read_json(&config_path).map_err(|message| GmError::ConfigRead {
        path: config_path.clone(),
        message,
    })?;

    if !value.is_array() {
        return Err(GmError::ConfigRead {
            path: config_path,
            message: "packages file must contain a JSON array".to_string(),
        });
    }

    Ok(EditablePackages {
        packages: normalize_package_list(&value),
        config_path,
    })
}

/// Write a normalized package list as pretty JSON with a trailing newline.
///
/// The parent directory is created if needed and the file is replaced via
/// a temporary sibling and rename.
pub fn write_packages<S: AsRef<str>>(path: &Path, packages: &[S]) -> Result<()> {
    let normalized = normalize_names(packages);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut content = serde_json::to_string_pretty(&normalized)?;
    content.push('\n');

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, &content)?;
    fs::rename(&temp_path, path)?;

    tracing::debug!("Wrote {} packages to {}", normalized.len(), path.display());
    Ok(())
}

fn read_json(path: &Path) -> std::result::Result<Value, String> {
    let raw = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&raw).map_err(|e| e.to_string())
}
