//! npm-backed package manager probe.

use serde_json::Value;
use std::time::Duration;

use super::{first_line, truncate_message, InstalledVersions, LatestVersion, PackageManager, Probe};
use crate::shell::{execute_quiet, CommandResult};

const NPM_COMMAND: &str = "npm";
const LIST_TIMEOUT: Duration = Duration::from_secs(60);
const VIEW_TIMEOUT: Duration = Duration::from_secs(10);

/// Probes the global npm installation by running the `npm` CLI.
#[derive(Debug, Clone)]
pub struct Npm {
    program: String,
    leading_args: Vec<String>,
    list_timeout: Duration,
    view_timeout: Duration,
}

impl Default for Npm {
    fn default() -> Self {
        Self::new()
    }
}

impl Npm {
    /// Use `npm` from PATH with default timeouts.
    pub fn new() -> Self {
        Self::with_program(NPM_COMMAND)
    }

    /// Use a specific npm executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            list_timeout: LIST_TIMEOUT,
            view_timeout: VIEW_TIMEOUT,
        }
    }

    /// Run npm through an interpreter, e.g. `node /path/to/npm-cli.js`.
    pub fn with_interpreter(interpreter: impl Into<String>, script: impl Into<String>) -> Self {
        let mut npm = Self::with_program(interpreter);
        npm.leading_args.push(script.into());
        npm
    }

    /// Override the per-call timeouts.
    pub fn with_timeouts(mut self, list: Duration, view: Duration) -> Self {
        self.list_timeout = list;
        self.view_timeout = view;
        self
    }

    fn run(&self, args: &[&str], timeout: Duration) -> Result<CommandResult, String> {
        let mut full: Vec<&str> = self.leading_args.iter().map(String::as_str).collect();
        full.extend_from_slice(args);
        execute_quiet(&self.program, &full, timeout).map_err(|e| e.to_string())
    }
}

impl PackageManager for Npm {
    fn name(&self) -> &str {
        NPM_COMMAND
    }

    fn list_installed(&self) -> Probe<InstalledVersions> {
        let result = match self.run(&["ls", "-g", "--depth", "0", "--json"], self.list_timeout) {
            Ok(result) => result,
            Err(message) => return Probe::Unavailable(message),
        };

        if result.timed_out {
            return Probe::Unavailable("npm ls timed out".to_string());
        }
        if !result.success {
            return Probe::Unavailable(format!(
                "npm ls exited with code {}",
                exit_code_label(&result)
            ));
        }

        match parse_installed(&result.stdout) {
            Some(installed) => {
                tracing::debug!("npm reports {} global packages", installed.len());
                Probe::Available(installed)
            }
            None => Probe::Unavailable("npm ls produced no usable JSON".to_string()),
        }
    }

    fn latest_version(&self, package: &str) -> LatestVersion {
        let result = match self.run(&["view", package, "version", "--json"], self.view_timeout) {
            Ok(result) => result,
            Err(message) => return LatestVersion::Failed(truncate_message(&message)),
        };

        if result.timed_out {
            return LatestVersion::Failed(format!(
                "npm view timed out after {}s",
                self.view_timeout.as_secs()
            ));
        }

        if !result.success {
            let message = first_line(&result.stderr)
                .map(String::from)
                .unwrap_or_else(|| {
                    format!("npm view exited with code {}", exit_code_label(&result))
                });
            return LatestVersion::Failed(truncate_message(&message));
        }

        let latest = parse_latest(&result.stdout);
        tracing::debug!("Latest {}: {:?}", package, latest);
        latest
    }
}

fn exit_code_label(result: &CommandResult) -> String {
    result
        .exit_code
        .map(|c| c.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Parse `npm ls -g --depth 0 --json` output.
///
/// Returns `None` for empty or non-JSON output. Dependencies without a
/// string `version` are skipped.
pub fn parse_installed(output: &str) -> Option<InstalledVersions> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return None;
    }

    let json: Value = serde_json::from_str(trimmed).ok()?;

    let mut installed = InstalledVersions::new();
    if let Some(deps) = json.get("dependencies").and_then(Value::as_object) {
        for (name, payload) in deps {
            if let Some(version) = payload.get("version").and_then(Value::as_str) {
                installed.insert(name.clone(), version.to_string());
            }
        }
    }

    Some(installed)
}

/// Parse `npm view <pkg> version --json` output.
///
/// Arrays yield their last element (npm lists matching versions in
/// publication order). Empty output is [`LatestVersion::Missing`];
/// unparsable output is a failure.
pub fn parse_latest(output: &str) -> LatestVersion {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return LatestVersion::Missing;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => items.last().map(scalar_version).unwrap_or(LatestVersion::Missing),
        Ok(value) => scalar_version(&value),
        Err(e) => LatestVersion::Failed(truncate_message(&format!(
            "unexpected npm view output: {}",
            e
        ))),
    }
}

fn scalar_version(value: &Value) -> LatestVersion {
    match value {
        Value::String(s) if !s.is_empty() => LatestVersion::Found(s.clone()),
        Value::String(_) | Value::Null | Value::Bool(false) => LatestVersion::Missing,
        other => LatestVersion::Found(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_installed_reads_dependency_versions() {
        let raw = r#"{
            "name": "lib",
            "dependencies": {
                "npm": {"version": "10.8.1", "overridden": false},
                "typescript": {"version": "5.4.5"},
                "broken": {"invalid": true}
            }
        }"#;

        let installed = parse_installed(raw).unwrap();

        assert_eq!(installed.len(), 2);
        assert_eq!(installed.get("npm").map(String::as_str), Some("10.8.1"));
        assert_eq!(installed.get("typescript").map(String::as_str), Some("5.4.5"));
        assert!(!installed.contains_key("broken"));
    }

    #[test]
    fn parse_installed_without_dependencies_is_empty() {
        assert_eq!(parse_installed("{}"), Some(InstalledVersions::new()));
    }

    #[test]
    fn parse_installed_rejects_garbage() {
        assert_eq!(parse_installed(""), None);
        assert_eq!(parse_installed("not json"), None);
    }

    #[test]
    fn parse_latest_scalar() {
        assert_eq!(parse_latest("\"1.2.3\"\n"), LatestVersion::Found("1.2.3".into()));
    }

    #[test]
    fn parse_latest_array_takes_last_element() {
        assert_eq!(
            parse_latest(r#"["1.0.0","1.2.0"]"#),
            LatestVersion::Found("1.2.0".into())
        );
        // Last, not highest.
        assert_eq!(
            parse_latest(r#"["2.0.0","1.5.0"]"#),
            LatestVersion::Found("1.5.0".into())
        );
    }

    #[test]
    fn parse_latest_empty_is_missing() {
        assert_eq!(parse_latest(""), LatestVersion::Missing);
        assert_eq!(parse_latest("  \n"), LatestVersion::Missing);
        assert_eq!(parse_latest("[]"), LatestVersion::Missing);
        assert_eq!(parse_latest("null"), LatestVersion::Missing);
    }

    #[test]
    fn parse_latest_non_string_elements() {
        assert_eq!(parse_latest("[1]"), LatestVersion::Found("1".into()));
        assert_eq!(parse_latest(r#"["1.0.0",null]"#), LatestVersion::Missing);
        assert_eq!(parse_latest(r#"["1.0.0",""]"#), LatestVersion::Missing);
    }

    #[test]
    fn parse_latest_garbage_is_failure() {
        assert!(matches!(parse_latest("<html>"), LatestVersion::Failed(_)));
    }

    #[test]
    fn missing_npm_binary_degrades() {
        let npm = Npm::with_program("gm-no-such-npm");

        assert!(!npm.list_installed().is_available());
        match npm.latest_version("left-pad") {
            LatestVersion::Failed(message) => assert!(message.contains("gm-no-such-npm")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    mod with_fake_npm {
        use super::*;
        use std::fs;
        use std::time::Instant;
        use tempfile::TempDir;

        /// Write a shell script standing in for npm.
        fn fake_npm(temp: &TempDir, body: &str) -> Npm {
            let path = temp.path().join("npm.sh");
            fs::write(&path, format!("{}\n", body)).unwrap();
            Npm::with_interpreter("sh", path.to_string_lossy().to_string())
        }

        #[test]
        fn list_installed_parses_output() {
            let temp = TempDir::new().unwrap();
            let npm = fake_npm(
                &temp,
                r#"echo '{"dependencies":{"eslint":{"version":"9.0.0"}}}'"#,
            );

            let installed = npm.list_installed().unwrap_or_default();

            assert_eq!(installed.get("eslint").map(String::as_str), Some("9.0.0"));
        }

        #[test]
        fn list_installed_nonzero_exit_is_unavailable() {
            let temp = TempDir::new().unwrap();
            let npm = fake_npm(&temp, "echo '{}'; exit 1");

            assert!(matches!(npm.list_installed(), Probe::Unavailable(_)));
        }

        #[test]
        fn latest_version_reports_first_stderr_line() {
            let temp = TempDir::new().unwrap();
            let npm = fake_npm(
                &temp,
                "echo '' >&2; echo 'npm ERR! code E404' >&2; echo 'npm ERR! 404 Not Found' >&2; exit 1",
            );

            assert_eq!(
                npm.latest_version("nope"),
                LatestVersion::Failed("npm ERR! code E404".into())
            );
        }

        #[test]
        fn latest_version_without_stderr_reports_exit_code() {
            let temp = TempDir::new().unwrap();
            let npm = fake_npm(&temp, "exit 7");

            assert_eq!(
                npm.latest_version("nope"),
                LatestVersion::Failed("npm view exited with code 7".into())
            );
        }

        #[test]
        fn latest_version_passes_package_name() {
            let temp = TempDir::new().unwrap();
            let npm = fake_npm(&temp, r#"echo "[\"0.1.0\",\"$2\"]""#);

            assert_eq!(
                npm.latest_version("left-pad"),
                LatestVersion::Found("left-pad".into())
            );
        }

        #[test]
        fn latest_version_times_out() {
            let temp = TempDir::new().unwrap();
            let npm = fake_npm(&temp, "exec sleep 5")
                .with_timeouts(Duration::from_secs(1), Duration::from_millis(100));

            assert!(matches!(npm.latest_version("slow"), LatestVersion::Failed(m) if m.contains("timed out")));
        }

        #[test]
        fn latest_version_timeout_holds_when_npm_has_a_child() {
            let temp = TempDir::new().unwrap();
            let npm = fake_npm(&temp, "sleep 4")
                .with_timeouts(Duration::from_secs(1), Duration::from_millis(200));

            let start = Instant::now();
            let latest = npm.latest_version("slow");

            assert!(start.elapsed() < Duration::from_secs(3));
            assert!(matches!(latest, LatestVersion::Failed(m) if m.contains("timed out")));
        }
    }
}
