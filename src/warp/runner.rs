//! Abstraction over `warp-cli` execution.
//!
//! [`CommandRunner`] lets the poller and the mutator run against a mock in
//! tests. [`SystemCommandRunner`] is the real implementation: it spawns the
//! binary, bounds the call with a timeout and never leaves a child behind.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::constants;
use crate::state::ConnectionState;

/// Why a `warp-cli` invocation produced no usable output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    /// The child did not exit before the deadline and was killed.
    #[error("timed out")]
    TimedOut,
    /// The child could not be spawned or waited on.
    #[error("{0}")]
    Failed(String),
}

/// A failed status query is reported as a state of its own.
impl From<RunError> for ConnectionState {
    fn from(err: RunError) -> Self {
        match err {
            RunError::TimedOut => Self::Timeout,
            RunError::Failed(msg) => Self::Error(msg),
        }
    }
}

/// Runs one synchronous `warp-cli` invocation.
///
/// A nonzero exit status is not an error: whatever stdout was produced is
/// returned and the caller's parser decides whether it means anything.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run the binary with `args`, giving up after `timeout`.
    fn run(&self, args: Vec<String>, timeout: Duration) -> Result<String, RunError>;
}

/// Default implementation backed by [`std::process::Command`].
pub struct SystemCommandRunner {
    program: PathBuf,
}

impl SystemCommandRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, args: Vec<String>, timeout: Duration) -> Result<String, RunError> {
        let deadline = Instant::now() + timeout;
        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RunError::Failed(format!("failed to run {}: {e}", self.program.display())))?;

        // Drain both pipes so a chatty child can't block on a full buffer.
        let (tx, rx) = mpsc::channel();
        drain(child.stdout.take(), Pipe::Stdout, tx.clone());
        drain(child.stderr.take(), Pipe::Stderr, tx);

        let status = wait_with_deadline(&mut child, deadline)?;

        // A descendant that inherited the pipes can keep them open after the
        // child exits; the deadline still applies.
        let (out, err) = collect_output(&rx, deadline).map_err(|e| {
            crate::log_debug!(
                "CMD",
                "{} {} exited but its output stayed open past the timeout",
                self.program.display(),
                args.join(" ")
            );
            e
        })?;

        if !status.success() {
            crate::log_debug!(
                "CMD",
                "{} {} exited with {status}: {}",
                self.program.display(),
                args.join(" "),
                err.trim()
            );
        }

        Ok(out)
    }
}

#[derive(Clone, Copy)]
enum Pipe {
    Stdout,
    Stderr,
}

/// Read a pipe to completion on a helper thread and send what was read.
fn drain<R: Read + Send + 'static>(pipe: Option<R>, kind: Pipe, tx: Sender<(Pipe, String)>) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        let _ = tx.send((kind, String::from_utf8_lossy(&buf).into_owned()));
    });
}

/// Wait for both drain threads, giving up at `deadline`.
///
/// Returns `(stdout, stderr)`.
fn collect_output(
    rx: &Receiver<(Pipe, String)>,
    deadline: Instant,
) -> Result<(String, String), RunError> {
    let mut out = String::new();
    let mut err = String::new();
    for _ in 0..2 {
        match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok((Pipe::Stdout, text)) => out = text,
            Ok((Pipe::Stderr, text)) => err = text,
            Err(RecvTimeoutError::Timeout) => return Err(RunError::TimedOut),
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    Ok((out, err))
}

/// Poll the child until it exits or `deadline` passes.
///
/// On timeout the child is killed and reaped before returning.
fn wait_with_deadline(
    child: &mut Child,
    deadline: Instant,
) -> Result<std::process::ExitStatus, RunError> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(RunError::TimedOut);
            }
            Ok(None) => thread::sleep(constants::CHILD_POLL_INTERVAL),
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(RunError::Failed(format!("failed to wait for child: {e}")));
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_run_captures_stdout() {
        let runner = SystemCommandRunner::new("sh");
        let out = runner
            .run(args(&["-c", "echo 'Status update: Connected'"]), Duration::from_secs(5))
            .unwrap();
        assert_eq!(out.trim(), "Status update: Connected");
    }

    #[test]
    fn test_nonzero_exit_is_ok_with_output() {
        let runner = SystemCommandRunner::new("sh");
        let out = runner
            .run(args(&["-c", "echo partial; exit 3"]), Duration::from_secs(5))
            .unwrap();
        assert_eq!(out.trim(), "partial");
    }

    #[test]
    fn test_timeout_kills_child() {
        let runner = SystemCommandRunner::new("sh");
        let started = Instant::now();
        let result = runner.run(args(&["-c", "sleep 5"]), Duration::from_millis(200));
        assert_eq!(result, Err(RunError::TimedOut));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_timeout_covers_output_held_open_after_exit() {
        let runner = SystemCommandRunner::new("sh");
        let started = Instant::now();
        let result = runner.run(
            args(&["-c", "echo 'Status update: Connected'; sleep 3 &"]),
            Duration::from_millis(200),
        );
        assert_eq!(result, Err(RunError::TimedOut));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_missing_program_is_failure() {
        let runner = SystemCommandRunner::new("/nonexistent/warp-cli-binary");
        let result = runner.run(args(&["status"]), Duration::from_secs(1));
        assert!(matches!(result, Err(RunError::Failed(msg)) if msg.contains("failed to run")));
    }
}
