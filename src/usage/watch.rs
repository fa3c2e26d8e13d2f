//! Refreshing usage dashboard.

use chrono::{DateTime, Local};
use console::Term;
use std::thread;
use std::time::Duration;

use super::source::{UsageSnapshot, UsageSources};
use super::table::render_report;
use crate::error::Result;
use crate::ui::GmTheme;

/// Default seconds between redraws.
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Redraws the usage table on a fixed interval until interrupted.
#[derive(Debug, Clone)]
pub struct UsageWatch {
    sources: UsageSources,
    interval: Duration,
}

impl UsageWatch {
    pub fn new(sources: UsageSources, interval: Duration) -> Self {
        Self {
            sources,
            interval: interval.max(Duration::from_secs(1)),
        }
    }

    /// One screenful: header, blank line, report.
    pub fn frame(&self, snapshot: &UsageSnapshot, now: DateTime<Local>, theme: &GmTheme) -> Vec<String> {
        let mut lines = vec![
            theme.format_header("AI Usage Monitor"),
            theme
                .dim
                .apply_to(format!(
                    "Last Update: {}  │  Refreshing every {}s  │  Press Ctrl-C to quit",
                    now.format("%m/%d/%Y, %H:%M:%S"),
                    self.interval.as_secs()
                ))
                .to_string(),
            String::new(),
        ];
        lines.extend(render_report(
            snapshot.claude.as_ref(),
            snapshot.codex.as_ref(),
            theme,
        ));
        lines
    }

    /// Clear and redraw forever. Only returns on a terminal write error.
    pub fn run(&self, term: &Term, theme: &GmTheme) -> Result<()> {
        loop {
            let snapshot = self.sources.fetch();
            let frame = self.frame(&snapshot, Local::now(), theme);

            term.clear_screen()?;
            for line in &frame {
                term.write_line(line)?;
            }

            tracing::debug!("Next usage refresh in {}s", self.interval.as_secs());
            thread::sleep(self.interval);
        }
    }
}
