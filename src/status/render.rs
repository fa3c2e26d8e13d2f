//! Human-readable status summaries.

use super::record::{PackageStatus, StatusReport};

/// Switches for [`render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Stay silent unless there is an update to report.
    pub quiet_when_none: bool,
    /// Also report tracked packages that are not installed.
    pub verbose: bool,
}

/// Render the summary line for a cached report.
///
/// At most one line is produced. Precedence is fixed: updates, then lookup
/// errors, then not-installed notices, then the all-clear. Updates are
/// reported even when some lookups failed.
pub fn render(report: Option<&StatusReport>, options: RenderOptions) -> Vec<String> {
    let Some(report) = report else {
        return unless_quiet(options, "status unavailable".to_string());
    };

    if report.has_status(PackageStatus::UpdateAvailable) {
        let updates: Vec<String> = report
            .with_status(PackageStatus::UpdateAvailable)
            .map(|pkg| {
                format!(
                    "{} {} → {}",
                    pkg.name,
                    pkg.installed.as_deref().unwrap_or("none"),
                    pkg.latest.as_deref().unwrap_or("unknown")
                )
            })
            .collect();
        return vec![format!("updates available: {}", updates.join(", "))];
    }

    if report.has_status(PackageStatus::Error) {
        let errors: Vec<String> = report
            .with_status(PackageStatus::Error)
            .map(|pkg| {
                format!(
                    "{}: {}",
                    pkg.name,
                    pkg.error.as_deref().unwrap_or("lookup failed")
                )
            })
            .collect();
        return unless_quiet(options, format!("lookup issue — {}", errors.join("; ")));
    }

    if report.has_status(PackageStatus::NotInstalled) {
        if !options.verbose {
            return Vec::new();
        }
        let names: Vec<&str> = report
            .with_status(PackageStatus::NotInstalled)
            .map(|pkg| pkg.name.as_str())
            .collect();
        return vec![format!("not installed: {}", names.join(", "))];
    }

    unless_quiet(options, "all set".to_string())
}

/// Lines printed by the collector after a run.
pub fn collection_summary(report: &StatusReport) -> Vec<String> {
    let updates: Vec<&str> = report
        .with_status(PackageStatus::UpdateAvailable)
        .map(|pkg| pkg.name.as_str())
        .collect();

    if updates.is_empty() {
        vec!["No updates available.".to_string()]
    } else {
        vec![format!("Updates available for: {}", updates.join(", "))]
    }
}

fn unless_quiet(options: RenderOptions, line: String) -> Vec<String> {
    if options.quiet_when_none {
        Vec::new()
    } else {
        vec![line]
    }
}
