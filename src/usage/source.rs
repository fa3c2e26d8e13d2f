//! Fetching usage reports from the external tools.

use serde::de::DeserializeOwned;
use std::time::Duration;

use super::model::{ClaudeUsage, CodexUsage};
use crate::shell::execute_quiet;

const CLAUDE_PROGRAM: &str = "ccusage";
const CODEX_PROGRAM: &str = "ccusage-codex";
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Both reports from one fetch. A `None` side could not be fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageSnapshot {
    pub claude: Option<ClaudeUsage>,
    pub codex: Option<CodexUsage>,
}

/// Where usage reports come from.
#[derive(Debug, Clone)]
pub struct UsageSources {
    claude: String,
    codex: String,
    since: Option<String>,
    timeout: Duration,
}

impl UsageSources {
    /// Default tools, optionally limited to dates from `since` (`YYYYMMDD`).
    pub fn new(since: Option<String>) -> Self {
        Self::with_programs(CLAUDE_PROGRAM, CODEX_PROGRAM, since)
    }

    /// Use specific executables.
    pub fn with_programs(
        claude: impl Into<String>,
        codex: impl Into<String>,
        since: Option<String>,
    ) -> Self {
        Self {
            claude: claude.into(),
            codex: codex.into(),
            since: since.filter(|s| !s.trim().is_empty()),
            timeout: FETCH_TIMEOUT,
        }
    }

    /// Run both tools.
    pub fn fetch(&self) -> UsageSnapshot {
        let since = self.since.as_deref();
        UsageSnapshot {
            claude: fetch_usage(&self.claude, since, self.timeout),
            codex: fetch_usage(&self.codex, since, self.timeout),
        }
    }
}

/// Run `<program> daily --json [--since <date>]` and parse its output.
///
/// Returns `None` when the program is missing, fails, times out or prints
/// something that is not a usage report.
pub fn fetch_usage<T: DeserializeOwned>(
    program: &str,
    since: Option<&str>,
    timeout: Duration,
) -> Option<T> {
    let mut args = vec!["daily", "--json"];
    if let Some(since) = since {
        args.extend(["--since", since]);
    }

    let result = match execute_quiet(program, &args, timeout) {
        Ok(result) => result,
        Err(e) => {
            tracing::debug!("{}", e);
            return None;
        }
    };

    if !result.success {
        tracing::debug!(
            "{} exited with {:?}{}",
            program,
            result.exit_code,
            if result.timed_out { " (timed out)" } else { "" }
        );
        return None;
    }

    parse_usage(program, &result.stdout)
}

/// Parse a tool's JSON report, logging and discarding anything else.
pub fn parse_usage<T: DeserializeOwned>(program: &str, stdout: &str) -> Option<T> {
    match serde_json::from_str(stdout.trim()) {
        Ok(usage) => Some(usage),
        Err(e) => {
            tracing::debug!("Ignoring unparsable {} output: {}", program, e);
            None
        }
    }
}
