//! External program execution.

use crate::error::{GmError, Result};
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How often a running child is polled while waiting for it to exit.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Result of executing an external program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timed out).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,

    /// Whether the child was killed after exceeding its timeout.
    pub timed_out: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
            timed_out: false,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
            timed_out: false,
        }
    }

    /// Create a result for a child that was killed at its deadline.
    pub fn timeout(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: None,
            stdout,
            stderr,
            duration,
            success: false,
            timed_out: true,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Capture stdout (if false, output is discarded).
    pub capture_stdout: bool,

    /// Capture stderr (if false, output is discarded).
    pub capture_stderr: bool,

    /// Kill the child after this long (None = wait indefinitely).
    pub timeout: Option<Duration>,
}

impl CommandOptions {
    /// Capture both streams and stop waiting after `timeout`.
    pub fn captured(timeout: Duration) -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
            timeout: Some(timeout),
            ..Default::default()
        }
    }
}

/// Execute `program` with `args` directly, without an intermediate shell.
///
/// Returns `Err(GmError::CommandSpawn)` only when the process cannot be
/// started. Non-zero exits and timeouts are reported through
/// [`CommandResult`].
///
/// On unix the child leads its own process group, and a timeout kills the
/// whole group. A timed-out result carries no output: descendants that
/// escaped the group may still hold the pipes open.
pub fn execute(program: &str, args: &[&str], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    tracing::debug!("Running {} {}", program, args.join(" "));

    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdin(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    cmd.stdout(if options.capture_stdout {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    cmd.stderr(if options.capture_stderr {
        Stdio::piped()
    } else {
        Stdio::null()
    });

    let mut child = cmd.spawn().map_err(|e| GmError::CommandSpawn {
        program: program.to_string(),
        message: e.to_string(),
    })?;

    // Drain both pipes on their own threads so a chatty child cannot block
    // on a full pipe while we wait for it.
    let stdout_handle = child.stdout.take().map(|mut out| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = out.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).to_string()
        })
    });
    let stderr_handle = child.stderr.take().map(|mut err| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = err.read_to_end(&mut buf);
            String::from_utf8_lossy(&buf).to_string()
        })
    });

    let deadline = options.timeout.map(|t| start + t);
    let status = loop {
        match child.try_wait()? {
            Some(status) => break Some(status),
            None => {
                if deadline.is_some_and(|d| Instant::now() >= d) {
                    kill_process_group(&mut child);
                    let _ = child.wait();
                    break None;
                }
                thread::sleep(POLL_INTERVAL);
            }
        }
    };

    let Some(status) = status else {
        // Reader threads are detached; they end once the last pipe holder exits.
        drop(stdout_handle);
        drop(stderr_handle);
        let duration = start.elapsed();
        tracing::warn!(
            "{} did not finish within {:?}; killed",
            program,
            options.timeout.unwrap_or_default()
        );
        return Ok(CommandResult::timeout(String::new(), String::new(), duration));
    };

    let stdout = stdout_handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();
    let stderr = stderr_handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();

    let duration = start.elapsed();

    if status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(status.code(), stdout, stderr, duration))
    }
}

/// Kill the child and, on unix, every process in its group.
fn kill_process_group(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
            // SAFETY: killpg only sends a signal; pgid is the group this
            // child was spawned to lead.
            unsafe {
                libc::killpg(pgid, libc::SIGKILL);
            }
        }
    }
    let _ = child.kill();
}

/// Execute a program, capturing both streams, with the given timeout.
pub fn execute_quiet(program: &str, args: &[&str], timeout: Duration) -> Result<CommandResult> {
    execute(program, args, &CommandOptions::captured(timeout))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    #[test]
    fn execute_successful_command() {
        let result = execute_quiet("sh", &["-c", "echo hello"], TIMEOUT).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
        assert!(!result.timed_out);
    }

    #[test]
    fn execute_failing_command() {
        let result = execute_quiet("sh", &["-c", "echo oops >&2; exit 3"], TIMEOUT).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert!(result.stderr.contains("oops"));
    }

    #[test]
    fn execute_passes_arguments_verbatim() {
        let result = execute_quiet("printf", &["%s|%s", "a b", "c"], TIMEOUT).unwrap();

        assert_eq!(result.stdout, "a b|c");
    }

    #[test]
    fn execute_uncaptured_streams_are_empty() {
        let options = CommandOptions {
            timeout: Some(TIMEOUT),
            ..Default::default()
        };

        let result = execute("sh", &["-c", "echo hidden"], &options).unwrap();

        assert!(result.success);
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn execute_kills_child_after_timeout() {
        let result = execute_quiet("sleep", &["5"], Duration::from_millis(100)).unwrap();

        assert!(result.timed_out);
        assert!(!result.success);
        assert_eq!(result.exit_code, None);
        assert!(result.duration < Duration::from_secs(5));
    }

    #[test]
    fn timeout_kills_grandchildren_holding_the_pipes() {
        let start = Instant::now();
        let result = execute_quiet("sh", &["-c", "sleep 4; echo late"], Duration::from_millis(200)).unwrap();

        assert!(result.timed_out);
        assert!(result.stdout.is_empty());
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn timeout_returns_when_a_descendant_leaves_the_group() {
        let start = Instant::now();
        let result = execute_quiet(
            "sh",
            &["-c", "setsid sleep 4 2>/dev/null || sleep 4 & wait"],
            Duration::from_millis(200),
        )
        .unwrap();

        assert!(result.timed_out);
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn execute_missing_program_is_spawn_error() {
        let err = execute_quiet("gm-definitely-not-a-real-binary", &[], TIMEOUT).unwrap_err();

        assert!(matches!(err, GmError::CommandSpawn { ref program, .. } if program == "gm-definitely-not-a-real-binary"));
    }

    #[test]
    fn command_result_tracks_duration() {
        let result = execute_quiet("sh", &["-c", "echo fast"], TIMEOUT).unwrap();

        assert!(result.duration.as_millis() < 5000);
    }
}
