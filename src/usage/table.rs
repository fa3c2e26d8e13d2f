//! Merging both usage reports into one table.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::model::{ClaudeDay, ClaudeUsage, CodexDay, CodexUsage};
use crate::ui::{Cell, Column, GmTheme, Table};

const DATE_WIDTH: usize = 12;
const SOURCE_WIDTH: usize = 6;
const MODEL_WIDTH: usize = 18;
const NUMBER_WIDTH: usize = 9;

const DISPLAY_DATE: &str = "%b %d, %Y";

/// Which tool a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageSource {
    Claude,
    Codex,
}

impl UsageSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Claude => "Claude",
            Self::Codex => "Codex",
        }
    }
}

/// Token counts and cost for one model (or one whole day).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelUsage {
    pub model: String,
    pub input: u64,
    pub output: u64,
    pub cache_read: u64,
    pub cache_write: u64,
    pub cost: f64,
}

impl ModelUsage {
    /// All tokens, cached ones included.
    pub fn total(&self) -> u64 {
        self.input + self.output + self.cache_read + self.cache_write
    }
}

/// One table row. `date` and `source` are blank on continuation rows.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRow {
    pub date: String,
    pub source: Option<UsageSource>,
    pub kind: UsageSource,
    pub usage: ModelUsage,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum DateKey {
    Known(NaiveDate),
    Other(String),
}

impl DateKey {
    fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(trimmed, DISPLAY_DATE))
            .map(Self::Known)
            .unwrap_or_else(|_| Self::Other(trimmed.to_string()))
    }

    fn label(&self) -> String {
        match self {
            Self::Known(date) => date.format(DISPLAY_DATE).to_string(),
            Self::Other(raw) => raw.clone(),
        }
    }
}

/// Render `2025-10-02` and `Oct 02, 2025` alike as `Oct 02, 2025`.
///
/// Unrecognized formats are returned trimmed but otherwise unchanged.
pub fn normalize_date(raw: &str) -> String {
    DateKey::parse(raw).label()
}

/// Short display name for a Claude model.
pub fn shorten_claude_model(name: &str) -> String {
    if name.contains("claude-sonnet-4-5") {
        "sonnet-4.5".to_string()
    } else if name.contains("claude-sonnet-4") {
        "sonnet-4".to_string()
    } else if name.contains("claude-sonnet-3-5") {
        "sonnet-3.5".to_string()
    } else if name.contains("claude-opus") {
        "opus".to_string()
    } else {
        name.to_string()
    }
}

/// Short display name for a Codex model.
pub fn shorten_codex_model(name: &str) -> String {
    if name.contains("gpt-5-codex") {
        "gpt-5-codex".to_string()
    } else if name.contains("gpt-5") {
        "gpt-5".to_string()
    } else if name.contains("gpt-4") {
        "gpt-4".to_string()
    } else {
        name.to_string()
    }
}

/// Fit a model name into the model column.
pub fn truncate_model(name: &str) -> String {
    if name.chars().count() > MODEL_WIDTH {
        let kept: String = name.chars().take(MODEL_WIDTH - 3).collect();
        format!("{}...", kept)
    } else {
        name.to_string()
    }
}

/// `1.2M`, `3.4K` or the plain integer.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Dollar amount with cents.
pub fn format_cost(cost: f64) -> String {
    format!("${:.2}", cost)
}

/// Per-model rows for a Claude day, or one aggregate row.
pub fn claude_breakdowns(day: &ClaudeDay) -> Vec<ModelUsage> {
    if day.model_breakdowns.is_empty() {
        return vec![ModelUsage {
            model: String::new(),
            input: day.input_tokens,
            output: day.output_tokens,
            cache_read: day.cache_read_tokens,
            cache_write: day.cache_creation_tokens,
            cost: day.total_cost,
        }];
    }

    day.model_breakdowns
        .iter()
        .map(|mb| ModelUsage {
            model: shorten_claude_model(&mb.model_name),
            input: mb.input_tokens,
            output: mb.output_tokens,
            cache_read: mb.cache_read_tokens,
            cache_write: mb.cache_creation_tokens,
            cost: mb.cost,
        })
        .collect()
}

/// Per-model rows for a Codex day, or one aggregate row.
///
/// The day's cost is split across models in proportion to their input
/// plus output tokens.
pub fn codex_breakdowns(day: &CodexDay) -> Vec<ModelUsage> {
    let mut rows: Vec<ModelUsage> = day
        .models
        .iter()
        .map(|(name, usage)| ModelUsage {
            model: shorten_codex_model(name),
            input: usage.input_tokens,
            output: usage.output_tokens,
            cache_read: usage.cached_input_tokens,
            cache_write: 0,
            cost: 0.0,
        })
        .collect();

    if rows.is_empty() {
        rows.push(ModelUsage {
            model: String::new(),
            input: day.input_tokens,
            output: day.output_tokens,
            cache_read: day.cached_input_tokens,
            cache_write: 0,
            cost: day.cost_usd,
        });
    }

    if day.cost_usd != 0.0 {
        let total_tokens: u64 = rows.iter().map(|r| r.input + r.output).sum();
        for row in &mut rows {
            row.cost = if total_tokens > 0 {
                day.cost_usd * (row.input + row.output) as f64 / total_tokens as f64
            } else {
                0.0
            };
        }
    }

    rows
}

/// Merge both reports into date-ordered rows.
///
/// Within a date Claude rows come before Codex rows. Recognized dates sort
/// chronologically; anything else sorts after them.
pub fn build_rows(claude: Option<&ClaudeUsage>, codex: Option<&CodexUsage>) -> Vec<UsageRow> {
    let mut by_date: BTreeMap<DateKey, Vec<(UsageSource, Vec<ModelUsage>)>> = BTreeMap::new();

    for day in claude.map(|c| c.daily.as_slice()).unwrap_or_default() {
        by_date
            .entry(DateKey::parse(&day.date))
            .or_default()
            .push((UsageSource::Claude, claude_breakdowns(day)));
    }
    for day in codex.map(|c| c.daily.as_slice()).unwrap_or_default() {
        by_date
            .entry(DateKey::parse(&day.date))
            .or_default()
            .push((UsageSource::Codex, codex_breakdowns(day)));
    }

    let mut rows = Vec::new();
    for (key, entries) in by_date {
        let label = key.label();
        let mut first_in_date = true;

        for (kind, models) in entries {
            for (i, usage) in models.into_iter().enumerate() {
                rows.push(UsageRow {
                    date: if first_in_date { label.clone() } else { String::new() },
                    source: (i == 0).then_some(kind),
                    kind,
                    usage,
                });
                first_in_date = false;
            }
        }
    }

    rows
}

/// Totals rows, Claude first. Only the first row carries the `TOTAL` label.
pub fn total_rows(claude: Option<&ClaudeUsage>, codex: Option<&CodexUsage>) -> Vec<UsageRow> {
    let mut rows = Vec::new();

    if let Some(t) = claude.and_then(|c| c.totals.as_ref()) {
        rows.push(UsageRow {
            date: String::new(),
            source: Some(UsageSource::Claude),
            kind: UsageSource::Claude,
            usage: ModelUsage {
                model: String::new(),
                input: t.input_tokens,
                output: t.output_tokens,
                cache_read: t.cache_read_tokens,
                cache_write: t.cache_creation_tokens,
                cost: t.total_cost,
            },
        });
    }

    if let Some(t) = codex.and_then(|c| c.totals.as_ref()) {
        rows.push(UsageRow {
            date: String::new(),
            source: Some(UsageSource::Codex),
            kind: UsageSource::Codex,
            usage: ModelUsage {
                model: String::new(),
                input: t.input_tokens,
                output: t.output_tokens,
                cache_read: t.cached_input_tokens,
                cache_write: 0,
                cost: t.cost_usd,
            },
        });
    }

    if let Some(first) = rows.first_mut() {
        first.date = "TOTAL".to_string();
    }
    rows
}

/// Render the merged table.
pub fn render_table(
    claude: Option<&ClaudeUsage>,
    codex: Option<&CodexUsage>,
    theme: &GmTheme,
) -> Vec<String> {
    let mut table = Table::new(vec![
        Column::left("Date", DATE_WIDTH),
        Column::left("Source", SOURCE_WIDTH),
        Column::left("Model", MODEL_WIDTH),
        Column::right("Input", NUMBER_WIDTH),
        Column::right("Output", NUMBER_WIDTH),
        Column::right("CacheRead", NUMBER_WIDTH),
        Column::right("CacheCrte", NUMBER_WIDTH),
        Column::right("Total", NUMBER_WIDTH),
        Column::right("Cost", NUMBER_WIDTH),
    ])
    .with_styles(&theme.border, &theme.highlight);

    for row in build_rows(claude, codex) {
        let style = source_style(row.kind, theme);
        let mut cells = vec![
            Cell::plain(row.date),
            Cell::styled(row.source.map(|s| s.label()).unwrap_or_default(), style),
            Cell::styled(truncate_model(&row.usage.model), style),
        ];
        cells.extend(number_cells(&row.usage, None));
        table.add_row(cells);
    }

    table.add_separator();

    for row in total_rows(claude, codex) {
        let source = source_style(row.kind, theme).clone().bold();
        let mut cells = vec![
            Cell::styled(row.date, &theme.total),
            Cell::styled(row.kind.label(), &source),
            Cell::plain(""),
        ];
        cells.extend(number_cells(&row.usage, Some(&theme.highlight)));
        table.add_row(cells);
    }

    table.render()
}

/// Table preceded by a warning when one source is missing, or a single
/// error line when both are.
pub fn render_report(
    claude: Option<&ClaudeUsage>,
    codex: Option<&CodexUsage>,
    theme: &GmTheme,
) -> Vec<String> {
    let warning = match (claude, codex) {
        (None, None) => {
            return vec![theme
                .error
                .apply_to("Error: Unable to fetch usage data from ccusage or ccusage-codex")
                .to_string()];
        }
        (None, Some(_)) => Some("Warning: Unable to fetch Claude usage data"),
        (Some(_), None) => Some("Warning: Unable to fetch Codex usage data"),
        (Some(_), Some(_)) => None,
    };

    let mut lines = Vec::new();
    if let Some(warning) = warning {
        lines.push(theme.warning.apply_to(warning).to_string());
        lines.push(String::new());
    }
    lines.extend(render_table(claude, codex, theme));
    lines
}

fn source_style(source: UsageSource, theme: &GmTheme) -> &console::Style {
    match source {
        UsageSource::Claude => &theme.claude,
        UsageSource::Codex => &theme.codex,
    }
}

fn number_cells(usage: &ModelUsage, style: Option<&console::Style>) -> Vec<Cell> {
    let values = [
        format_number(usage.input),
        format_number(usage.output),
        format_number(usage.cache_read),
        format_number(usage.cache_write),
        format_number(usage.total()),
        format_cost(usage.cost),
    ];
    values
        .into_iter()
        .map(|text| match style {
            Some(style) => Cell::styled(text, style),
            None => Cell::plain(text),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::model::{
        ClaudeModelBreakdown, ClaudeTotals, CodexModelUsage, CodexTotals,
    };

    fn claude_day(date: &str, models: &[(&str, u64, f64)]) -> ClaudeDay {
        ClaudeDay {
            date: date.to_string(),
            input_tokens: 10,
            output_tokens: 5,
            total_cost: 0.1,
            model_breakdowns: models
                .iter()
                .map(|(name, input, cost)| ClaudeModelBreakdown {
                    model_name: name.to_string(),
                    input_tokens: *input,
                    cost: *cost,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn codex_day(date: &str, cost: f64, models: &[(&str, u64, u64)]) -> CodexDay {
        CodexDay {
            date: date.to_string(),
            cost_usd: cost,
            models: models
                .iter()
                .map(|(name, input, output)| {
                    (
                        name.to_string(),
                        CodexModelUsage {
                            input_tokens: *input,
                            output_tokens: *output,
                            cached_input_tokens: 0,
                        },
                    )
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn normalize_date_formats() {
        assert_eq!(normalize_date("2025-10-02"), "Oct 02, 2025");
        assert_eq!(normalize_date("Oct 02, 2025"), "Oct 02, 2025");
        assert_eq!(normalize_date("yesterday"), "yesterday");
    }

    #[test]
    fn model_names_are_shortened() {
        assert_eq!(shorten_claude_model("claude-sonnet-4-5-20250929"), "sonnet-4.5");
        assert_eq!(shorten_claude_model("claude-sonnet-4-20250514"), "sonnet-4");
        assert_eq!(shorten_claude_model("claude-sonnet-3-5-latest"), "sonnet-3.5");
        assert_eq!(shorten_claude_model("claude-opus-4-1"), "opus");
        assert_eq!(shorten_claude_model("haiku"), "haiku");
        assert_eq!(shorten_codex_model("gpt-5-codex-high"), "gpt-5-codex");
        assert_eq!(shorten_codex_model("gpt-5-mini"), "gpt-5");
        assert_eq!(shorten_codex_model("gpt-4o"), "gpt-4");
    }

    #[test]
    fn long_model_names_are_truncated() {
        assert_eq!(truncate_model("exactly-eighteen-c"), "exactly-eighteen-c");
        assert_eq!(truncate_model("a-very-long-model-name-indeed"), "a-very-long-mod...");
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(3_400), "3.4K");
        assert_eq!(format_number(1_260_000), "1.3M");
        assert_eq!(format_cost(0.0), "$0.00");
        assert_eq!(format_cost(12.346), "$12.35");
    }

    #[test]
    fn codex_cost_is_split_by_tokens() {
        let day = codex_day("2025-10-02", 1.0, &[("gpt-5", 300, 0), ("gpt-5-codex", 50, 50)]);

        let rows = codex_breakdowns(&day);

        assert_eq!(rows.len(), 2);
        assert!((rows[0].cost - 0.75).abs() < 1e-9);
        assert!((rows[1].cost - 0.25).abs() < 1e-9);
    }

    #[test]
    fn codex_cost_with_no_tokens_is_zero() {
        let day = codex_day("2025-10-02", 2.0, &[("gpt-5", 0, 0)]);

        assert_eq!(codex_breakdowns(&day)[0].cost, 0.0);
    }

    #[test]
    fn codex_day_without_models_is_aggregate() {
        let day = CodexDay {
            date: "2025-10-02".into(),
            input_tokens: 10,
            output_tokens: 10,
            cached_input_tokens: 4,
            cost_usd: 0.3,
            ..Default::default()
        };

        let rows = codex_breakdowns(&day);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].model, "");
        assert_eq!(rows[0].cache_read, 4);
        assert!((rows[0].cost - 0.3).abs() < 1e-9);
    }

    #[test]
    fn claude_day_without_models_is_aggregate() {
        let rows = claude_breakdowns(&claude_day("2025-10-02", &[]));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].input, 10);
        assert_eq!(rows[0].total(), 15);
    }

    #[test]
    fn rows_merge_across_sources_by_date() {
        let claude = ClaudeUsage {
            daily: vec![
                claude_day("2025-10-03", &[("claude-opus-4", 1, 0.0)]),
                claude_day("2025-10-01", &[("claude-sonnet-4-5", 1, 0.0), ("claude-opus-4", 2, 0.0)]),
            ],
            totals: None,
        };
        let codex = CodexUsage {
            daily: vec![codex_day("Oct 01, 2025", 0.0, &[("gpt-5", 1, 1)])],
            totals: None,
        };

        let rows = build_rows(Some(&claude), Some(&codex));

        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["Oct 01, 2025", "", "", "Oct 03, 2025"]);
        let kinds: Vec<UsageSource> = rows.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                UsageSource::Claude,
                UsageSource::Claude,
                UsageSource::Codex,
                UsageSource::Claude
            ]
        );
        assert_eq!(rows[1].source, None);
        assert_eq!(rows[2].source, Some(UsageSource::Codex));
        assert_eq!(rows[2].usage.model, "gpt-5");
    }

    #[test]
    fn unknown_dates_sort_last() {
        let claude = ClaudeUsage {
            daily: vec![
                claude_day("someday", &[]),
                claude_day("2024-01-01", &[]),
            ],
            totals: None,
        };

        let rows = build_rows(Some(&claude), None);

        assert_eq!(rows[0].date, "Jan 01, 2024");
        assert_eq!(rows[1].date, "someday");
    }

    #[test]
    fn totals_label_only_first_row() {
        let claude = ClaudeUsage {
            daily: Vec::new(),
            totals: Some(ClaudeTotals {
                input_tokens: 1,
                ..Default::default()
            }),
        };
        let codex = CodexUsage {
            daily: Vec::new(),
            totals: Some(CodexTotals {
                cached_input_tokens: 7,
                ..Default::default()
            }),
        };

        let rows = total_rows(Some(&claude), Some(&codex));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "TOTAL");
        assert_eq!(rows[0].kind, UsageSource::Claude);
        assert_eq!(rows[1].date, "");
        assert_eq!(rows[1].usage.cache_read, 7);

        let codex_only = total_rows(None, Some(&codex));
        assert_eq!(codex_only[0].date, "TOTAL");
    }

    #[test]
    fn rendered_table_layout() {
        let claude = ClaudeUsage {
            daily: vec![claude_day("2025-10-02", &[("claude-sonnet-4-5-20250929", 1_500, 0.5)])],
            totals: Some(ClaudeTotals {
                input_tokens: 1_500,
                total_cost: 0.5,
                ..Default::default()
            }),
        };

        let lines = render_table(Some(&claude), None, &GmTheme::plain());

        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("│ Date         │ Source │ Model              │ Input     │"));
        assert_eq!(
            lines[3],
            "│ Oct 02, 2025 │ Claude │ sonnet-4.5         │      1.5K │         0 │         0 │         0 │      1.5K │     $0.50 │"
        );
        assert!(lines[5].starts_with("│ TOTAL        │ Claude │"));
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn report_warns_about_missing_source() {
        let theme = GmTheme::plain();
        let claude = ClaudeUsage::default();

        let lines = render_report(Some(&claude), None, &theme);
        assert_eq!(lines[0], "Warning: Unable to fetch Codex usage data");
        assert_eq!(lines[1], "");

        let codex = CodexUsage::default();
        let lines = render_report(None, Some(&codex), &theme);
        assert_eq!(lines[0], "Warning: Unable to fetch Claude usage data");
    }

    #[test]
    fn report_without_sources_is_error() {
        let lines = render_report(None, None, &GmTheme::plain());

        assert_eq!(
            lines,
            vec!["Error: Unable to fetch usage data from ccusage or ccusage-codex"]
        );
    }
}
