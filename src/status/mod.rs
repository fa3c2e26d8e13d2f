//! The update-status pipeline.
//!
//! - [`record`] - report data model and on-disk format
//! - [`classify`] - turns probe results into per-package statuses
//! - [`cache`] - persists the latest report
//! - [`render`] - produces the one-line summary
//!
//! # Example
//!
//! ```
//! use gm::registry::{InstalledVersions, LatestVersion};
//! use gm::status::{classify, render, RenderOptions};
//!
//! let mut installed = InstalledVersions::new();
//! installed.insert("a".to_string(), "1.0.0".to_string());
//!
//! let names = vec!["a".to_string()];
//! let report = classify(&names, &installed, |_| LatestVersion::Found("1.1.0".into()), 1).unwrap();
//!
//! let lines = render(Some(&report), RenderOptions::default());
//! assert_eq!(lines, vec!["updates available: a 1.0.0 → 1.1.0"]);
//! ```

pub mod cache;
pub mod classify;
pub mod record;
pub mod render;

pub use cache::StatusCache;
pub use classify::{classify, classify_one, collect, DEFAULT_JOBS};
pub use record::{PackageStatus, PackageStatusRecord, StatusReport, StatusSummary};
pub use render::{collection_summary, render, RenderOptions};
