//! Token and cost usage reported by `ccusage` and `ccusage-codex`.
//!
//! - [`model`] - the tools' JSON reports
//! - [`source`] - running the tools
//! - [`table`] - merging both reports into one table
//! - [`watch`] - the refreshing dashboard

pub mod model;
pub mod source;
pub mod table;
pub mod watch;

pub use model::{ClaudeUsage, CodexUsage};
pub use source::{fetch_usage, UsageSnapshot, UsageSources};
pub use table::{
    build_rows, format_cost, format_number, normalize_date, render_report, render_table,
    UsageRow, UsageSource,
};
pub use watch::{UsageWatch, DEFAULT_INTERVAL_SECS};
