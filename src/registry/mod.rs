//! Package registry probing.
//!
//! A [`PackageManager`] answers two questions: which packages are installed
//! globally, and what is the latest published version of a package. Failures
//! never escape this boundary as errors; they are folded into [`Probe`] and
//! [`LatestVersion`] so callers can tell "found nothing" from "could not ask".

pub mod npm;

use std::collections::BTreeMap;

pub use npm::{parse_installed, parse_latest, Npm};

/// Installed package name to version.
pub type InstalledVersions = BTreeMap<String, String>;

/// Outcome of a probe that can be unavailable as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    /// The probe ran and produced data (possibly empty).
    Available(T),
    /// The probe could not run or its output was unusable.
    Unavailable(String),
}

impl<T: Default> Probe<T> {
    /// The data, or an empty value when unavailable.
    pub fn unwrap_or_default(self) -> T {
        match self {
            Self::Available(data) => data,
            Self::Unavailable(_) => T::default(),
        }
    }
}

impl<T> Probe<T> {
    /// Whether the probe produced data.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Outcome of a latest-version lookup for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatestVersion {
    /// The registry reported a version.
    Found(String),
    /// The lookup succeeded but returned nothing.
    Missing,
    /// The lookup failed; carries a short human-readable reason.
    Failed(String),
}

impl LatestVersion {
    /// The version, if one was found.
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Found(v) => Some(v),
            _ => None,
        }
    }
}

/// A package manager that can be asked about global installs.
pub trait PackageManager: Send + Sync {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// List globally installed packages with their versions.
    fn list_installed(&self) -> Probe<InstalledVersions>;

    /// Look up the latest published version of `package`.
    fn latest_version(&self, package: &str) -> LatestVersion;
}

/// Longest failure message kept from an external tool, in characters.
pub const MAX_MESSAGE_CHARS: usize = 200;

/// Shorten `message` to at most [`MAX_MESSAGE_CHARS`] characters.
pub fn truncate_message(message: &str) -> String {
    if message.chars().count() <= MAX_MESSAGE_CHARS {
        return message.to_string();
    }
    let kept: String = message.chars().take(MAX_MESSAGE_CHARS - 3).collect();
    format!("{}…", kept)
}

/// First non-empty line of `text`, trimmed.
pub fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}
