//! Config and cache path resolution.
//!
//! Paths are resolved exactly once at startup from the global CLI flags
//! (which clap also fills from `GM_CONFIG` / `GM_CACHE`) and then passed to
//! every command. Nothing below `main` reads the environment for paths.

use std::path::{Path, PathBuf};

/// Environment variable overriding the tracked package list path.
pub const CONFIG_ENV: &str = "GM_CONFIG";

/// Environment variable overriding the status cache path.
pub const CACHE_ENV: &str = "GM_CACHE";

/// Resolved locations for the tracked package list and the status cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Path the package list is edited at (override, else user default).
    config: PathBuf,

    /// Read candidates in priority order: override, user default, bundled.
    config_candidates: Vec<PathBuf>,

    /// Status cache file.
    cache: PathBuf,
}

impl Paths {
    /// Resolve paths from optional overrides.
    ///
    /// Blank overrides are ignored, matching an unset variable.
    pub fn resolve(config_override: Option<&Path>, cache_override: Option<&Path>) -> Self {
        let config_override = config_override.and_then(non_blank);
        let cache_override = cache_override.and_then(non_blank);

        let user_default = default_config_path();
        let config = config_override
            .clone()
            .unwrap_or_else(|| user_default.clone());

        let mut config_candidates = Vec::new();
        if let Some(path) = config_override {
            config_candidates.push(path);
        }
        config_candidates.push(user_default);
        if let Some(bundled) = bundled_config_path() {
            config_candidates.push(bundled);
        }

        let cache = cache_override.unwrap_or_else(default_cache_path);

        Self {
            config,
            config_candidates,
            cache,
        }
    }

    /// Build paths explicitly (no defaults consulted).
    pub fn new(config: impl Into<PathBuf>, candidates: Vec<PathBuf>, cache: impl Into<PathBuf>) -> Self {
        Self {
            config: config.into(),
            config_candidates: candidates,
            cache: cache.into(),
        }
    }

    /// Path the package list is written to when edited.
    pub fn config(&self) -> &Path {
        &self.config
    }

    /// Candidates consulted, in order, when loading the package list.
    pub fn config_candidates(&self) -> &[PathBuf] {
        &self.config_candidates
    }

    /// Status cache file.
    pub fn cache(&self) -> &Path {
        &self.cache
    }
}

fn non_blank(path: &Path) -> Option<PathBuf> {
    let raw = path.to_string_lossy();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// User-level package list: `~/.config/gm/packages.json`.
pub fn default_config_path() -> PathBuf {
    home().join(".config").join("gm").join("packages.json")
}

/// User-level status cache: `~/.cache/gm/status.json`.
pub fn default_cache_path() -> PathBuf {
    home().join(".cache").join("gm").join("status.json")
}

/// Package list shipped next to the installation: `<prefix>/config/packages.json`
/// for an executable at `<prefix>/bin/gm`.
pub fn bundled_config_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let bin_dir = exe.parent()?;
    let prefix = bin_dir.parent().unwrap_or(bin_dir);
    Some(prefix.join("config").join("packages.json"))
}
