//! Status report data model.
//!
//! These types are the on-disk contract of the status cache: field names are
//! camelCase and status codes snake_case so the file stays readable by other
//! tools that consume it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a single tracked package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    /// Installed version equals the latest published version.
    UpToDate,
    /// Installed version differs from the latest published version.
    UpdateAvailable,
    /// Published, but not installed globally.
    NotInstalled,
    /// The latest-version lookup failed.
    Error,
    /// Not enough information to decide.
    Unknown,
}

impl PackageStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpToDate => "up_to_date",
            Self::UpdateAvailable => "update_available",
            Self::NotInstalled => "not_installed",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of one tracked package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageStatusRecord {
    /// Package name as listed in the tracked package list.
    pub name: String,
    /// Globally installed version, if any.
    #[serde(default)]
    pub installed: Option<String>,
    /// Latest published version, if the lookup returned one.
    #[serde(default)]
    pub latest: Option<String>,
    /// Derived status.
    pub status: PackageStatus,
    /// Lookup failure message; present only for [`PackageStatus::Error`].
    #[serde(default)]
    pub error: Option<String>,
}

impl PackageStatusRecord {
    /// Build a record from lookup results.
    ///
    /// Versions are compared as exact strings: `1.0` and `1.0.0` count as
    /// different versions.
    pub fn classify(name: impl Into<String>, installed: Option<String>, latest: Option<String>) -> Self {
        let status = match (&installed, &latest) {
            (None, Some(_)) => PackageStatus::NotInstalled,
            (_, None) => PackageStatus::Unknown,
            (Some(i), Some(l)) if i == l => PackageStatus::UpToDate,
            (Some(_), Some(_)) => PackageStatus::UpdateAvailable,
        };

        Self {
            name: name.into(),
            installed,
            latest,
            status,
            error: None,
        }
    }

    /// Build a record for a failed latest-version lookup.
    pub fn failed(name: impl Into<String>, installed: Option<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            installed,
            latest: None,
            status: PackageStatus::Error,
            error: Some(error.into()),
        }
    }
}

/// Tally of record statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub total: usize,
    pub updates_available: usize,
    pub not_installed: usize,
    pub errors: usize,
}

impl StatusSummary {
    /// Count statuses across `records`.
    pub fn tally(records: &[PackageStatusRecord]) -> Self {
        let count = |status: PackageStatus| records.iter().filter(|r| r.status == status).count();

        Self {
            total: records.len(),
            updates_available: count(PackageStatus::UpdateAvailable),
            not_installed: count(PackageStatus::NotInstalled),
            errors: count(PackageStatus::Error),
        }
    }
}

/// Result of one collection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    /// When the collection ran.
    pub generated_at: DateTime<Utc>,
    /// One record per tracked package, in tracked order.
    #[serde(default)]
    pub packages: Vec<PackageStatusRecord>,
    /// Counts over `packages`.
    pub summary: StatusSummary,
    /// Set when the whole run failed before producing per-package data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusReport {
    /// Build a report from records, stamped now.
    pub fn new(packages: Vec<PackageStatusRecord>) -> Self {
        Self::at(Utc::now(), packages)
    }

    /// Build a report from records with an explicit timestamp.
    pub fn at(generated_at: DateTime<Utc>, packages: Vec<PackageStatusRecord>) -> Self {
        let summary = StatusSummary::tally(&packages);
        Self {
            generated_at,
            packages,
            summary,
            error: None,
        }
    }

    /// Build the report written when collection failed outright.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            packages: Vec::new(),
            summary: StatusSummary {
                errors: 1,
                ..Default::default()
            },
            error: Some(message.into()),
        }
    }

    /// Records with the given status, in report order.
    pub fn with_status(&self, status: PackageStatus) -> impl Iterator<Item = &PackageStatusRecord> {
        self.packages.iter().filter(move |r| r.status == status)
    }

    /// Whether any record has the given status.
    pub fn has_status(&self, status: PackageStatus) -> bool {
        self.with_status(status).next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn classify_not_installed() {
        let r = PackageStatusRecord::classify("a", None, v("1.0.0"));
        assert_eq!(r.status, PackageStatus::NotInstalled);
    }

    #[test]
    fn classify_unknown_without_latest() {
        assert_eq!(
            PackageStatusRecord::classify("a", v("1.0.0"), None).status,
            PackageStatus::Unknown
        );
        assert_eq!(
            PackageStatusRecord::classify("a", None, None).status,
            PackageStatus::Unknown
        );
    }

    #[test]
    fn classify_up_to_date_and_update() {
        assert_eq!(
            PackageStatusRecord::classify("a", v("1.0.0"), v("1.0.0")).status,
            PackageStatus::UpToDate
        );
        assert_eq!(
            PackageStatusRecord::classify("a", v("1.0.0"), v("1.1.0")).status,
            PackageStatus::UpdateAvailable
        );
    }

    #[test]
    fn classify_compares_versions_lexically() {
        // Same version, different spelling: reported as an update.
        let r = PackageStatusRecord::classify("a", v("1.0"), v("1.0.0"));
        assert_eq!(r.status, PackageStatus::UpdateAvailable);

        // A "newer" install still differs from latest.
        let r = PackageStatusRecord::classify("a", v("2.0.0"), v("1.9.9"));
        assert_eq!(r.status, PackageStatus::UpdateAvailable);
    }

    #[test]
    fn failed_record_has_error_and_no_latest() {
        let r = PackageStatusRecord::failed("a", v("1.0.0"), "E404");
        assert_eq!(r.status, PackageStatus::Error);
        assert_eq!(r.error.as_deref(), Some("E404"));
        assert_eq!(r.installed.as_deref(), Some("1.0.0"));
        assert!(r.latest.is_none());
    }

    #[test]
    fn summary_tallies_statuses() {
        let records = vec![
            PackageStatusRecord::classify("a", v("1"), v("2")),
            PackageStatusRecord::classify("b", None, v("2")),
            PackageStatusRecord::failed("c", None, "boom"),
            PackageStatusRecord::classify("d", v("2"), v("2")),
            PackageStatusRecord::classify("e", v("1"), v("3")),
        ];

        let summary = StatusSummary::tally(&records);

        assert_eq!(
            summary,
            StatusSummary {
                total: 5,
                updates_available: 2,
                not_installed: 1,
                errors: 1,
            }
        );
    }

    #[test]
    fn report_serializes_with_camel_case_fields() {
        let report = StatusReport::new(vec![PackageStatusRecord::classify(
            "a",
            v("1.0.0"),
            v("1.1.0"),
        )]);

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert!(json.get("generatedAt").is_some());
        assert_eq!(json["summary"]["updatesAvailable"], 1);
        assert_eq!(json["summary"]["notInstalled"], 0);
        assert_eq!(json["packages"][0]["status"], "update_available");
        assert!(json["packages"][0]["error"].is_null());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn failed_report_counts_one_error() {
        let report = StatusReport::failed("npm exploded");

        assert!(report.packages.is_empty());
        assert_eq!(report.summary.errors, 1);
        assert_eq!(report.summary.total, 0);
        assert_eq!(report.error.as_deref(), Some("npm exploded"));
    }

    #[test]
    fn report_deserializes_hand_written_json() {
        let raw = r#"{
            "generatedAt": "2025-10-02T08:00:00.000Z",
            "packages": [
                {"name": "a", "installed": null, "latest": "1.0.0", "status": "not_installed", "error": null}
            ],
            "summary": {"total": 1, "updatesAvailable": 0, "notInstalled": 1, "errors": 0}
        }"#;

        let report: StatusReport = serde_json::from_str(raw).unwrap();

        assert_eq!(report.packages[0].status, PackageStatus::NotInstalled);
        assert!(report.has_status(PackageStatus::NotInstalled));
        assert!(!report.has_status(PackageStatus::Error));
    }

    #[test]
    fn status_display_matches_wire_name() {
        assert_eq!(PackageStatus::UpdateAvailable.to_string(), "update_available");
        assert_eq!(PackageStatus::UpToDate.to_string(), "up_to_date");
    }
}
