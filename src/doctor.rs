//! Environment diagnostics.
//!
//! Each check inspects one thing gm depends on and reports a
//! [`DoctorCheck`]. Checks never fail; problems are expressed through
//! [`CheckStatus`].

use regex::Regex;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use crate::config::Paths;
use crate::registry::first_line;
use crate::shell::execute_quiet;

/// Oldest Node.js major version gm is tested against.
pub const MIN_NODE_MAJOR: u32 = 16;

const VERSION_TIMEOUT: Duration = Duration::from_secs(10);
const PROBE_FILE: &str = ".gm-doctor-probe";

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"v?(\d+)\.(\d+)(?:\.(\d+))?").expect("version regex is valid")
});

/// Severity of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Info,
    Warn,
    Error,
}

impl CheckStatus {
    /// Lowercase label used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCheck {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

impl DoctorCheck {
    fn new(name: &str, status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            detail: detail.into(),
        }
    }
}

/// Programs the doctor runs.
#[derive(Debug, Clone)]
pub struct Doctor {
    node: String,
    npm: String,
}

impl Default for Doctor {
    fn default() -> Self {
        Self {
            node: "node".to_string(),
            npm: "npm".to_string(),
        }
    }
}

impl Doctor {
    /// Use specific `node` and `npm` executables.
    pub fn with_programs(node: impl Into<String>, npm: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            npm: npm.into(),
        }
    }

    /// Run every check in display order.
    pub fn run(&self, paths: &Paths) -> Vec<DoctorCheck> {
        vec![
            self.check_node(),
            self.check_npm(),
            check_cache_dir(paths.cache()),
            check_config_file(paths.config()),
        ]
    }

    fn check_node(&self) -> DoctorCheck {
        let version = execute_quiet(&self.node, &["--version"], VERSION_TIMEOUT)
            .ok()
            .filter(|r| r.success)
            .and_then(|r| first_line(&r.stdout).map(String::from));
        node_check(version.as_deref())
    }

    fn check_npm(&self) -> DoctorCheck {
        const NAME: &str = "npm availability";

        let result = match execute_quiet(&self.npm, &["--version"], VERSION_TIMEOUT) {
            Ok(result) => result,
            Err(e) => return DoctorCheck::new(NAME, CheckStatus::Error, e.to_string()),
        };

        if result.timed_out {
            return DoctorCheck::new(NAME, CheckStatus::Error, "npm --version timed out");
        }
        if !result.success {
            let detail = first_line(&result.stderr)
                .unwrap_or("npm returned a non-zero exit code")
                .to_string();
            return DoctorCheck::new(NAME, CheckStatus::Error, detail);
        }

        let version = first_line(&result.stdout).unwrap_or("unknown");
        DoctorCheck::new(NAME, CheckStatus::Ok, format!("npm {}", version))
    }
}

/// Run the default checks.
pub fn run_doctor(paths: &Paths) -> Vec<DoctorCheck> {
    Doctor::default().run(paths)
}

/// True when any check is an error.
pub fn has_errors(checks: &[DoctorCheck]) -> bool {
    checks.iter().any(|c| c.status == CheckStatus::Error)
}

/// Extract the major version from `node --version` output.
pub fn parse_major_version(output: &str) -> Option<u32> {
    VERSION_REGEX
        .captures(output)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn node_check(version: Option<&str>) -> DoctorCheck {
    const NAME: &str = "Node.js version";

    let Some(version) = version else {
        return DoctorCheck::new(
            NAME,
            CheckStatus::Warn,
            format!("node unknown (expected >= {})", MIN_NODE_MAJOR),
        );
    };
    let version = version.trim().trim_start_matches('v');

    match parse_major_version(version) {
        Some(major) if major >= MIN_NODE_MAJOR => {
            DoctorCheck::new(NAME, CheckStatus::Ok, format!("node {}", version))
        }
        _ => DoctorCheck::new(
            NAME,
            CheckStatus::Warn,
            format!("node {} (expected >= {})", version, MIN_NODE_MAJOR),
        ),
    }
}

fn check_cache_dir(cache: &Path) -> DoctorCheck {
    const NAME: &str = "Cache directory";

    let dir = match cache.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let probe = dir.join(PROBE_FILE);
    let outcome = fs::create_dir_all(dir)
        .and_then(|_| fs::write(&probe, b"ok"))
        .and_then(|_| fs::remove_file(&probe));

    match outcome {
        Ok(()) => DoctorCheck::new(NAME, CheckStatus::Ok, dir.display().to_string()),
        Err(e) => DoctorCheck::new(
            NAME,
            CheckStatus::Warn,
            format!("{} ({})", dir.display(), e),
        ),
    }
}

fn check_config_file(config: &Path) -> DoctorCheck {
    const NAME: &str = "Config file";

    if !config.exists() {
        return DoctorCheck::new(
            NAME,
            CheckStatus::Info,
            format!("{} (will be created when needed)", config.display()),
        );
    }

    match OpenOptions::new().read(true).write(true).open(config) {
        Ok(_) => DoctorCheck::new(NAME, CheckStatus::Ok, config.display().to_string()),
        Err(e) => DoctorCheck::new(
            NAME,
            CheckStatus::Warn,
            format!("{} ({})", config.display(), e),
        ),
    }
}
