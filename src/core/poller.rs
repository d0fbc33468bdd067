//! Background `warp-cli` poller.
//!
//! Each poller runs on its own thread and repeats a query, parses it and
//! sends the result through an MPSC channel whenever it changes. The
//! [`PollerHandle`] owns both the cancel flag and the receiver: dropping
//! the handle (or overwriting the `Option` slot that holds it) stops the
//! thread, so at most one poller per slot is ever alive.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::state::{SettingsSnapshot, StatusSnapshot};
use crate::warp::{parse_settings, parse_status, CommandRunner, RunError};

/// What a poller queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollTarget {
    /// `warp-cli status`
    Status,
    /// `warp-cli settings list`
    Settings,
}

impl PollTarget {
    fn args(self) -> Vec<String> {
        match self {
            Self::Status => vec!["status".into()],
            Self::Settings => vec!["settings".into(), "list".into()],
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Settings => "settings",
        }
    }

    /// Turn one query result into an update. Failures never escape.
    fn interpret(self, result: Result<String, RunError>) -> PollUpdate {
        match (self, result) {
            (Self::Status, Ok(out)) => PollUpdate::Status(parse_status(&out)),
            (Self::Status, Err(e)) => PollUpdate::Status(StatusSnapshot::failed(e.into())),
            (Self::Settings, Ok(out)) => PollUpdate::Settings(parse_settings(&out)),
            (Self::Settings, Err(e)) => PollUpdate::SettingsFailed(e.to_string()),
        }
    }
}

/// Result of one poll cycle, sent to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollUpdate {
    /// Fresh status (including `Timeout` / `Error` on a failed query).
    Status(StatusSnapshot),
    /// Fresh mode and port.
    Settings(SettingsSnapshot),
    /// The settings query failed; the last good values stay in place.
    SettingsFailed(String),
}

/// Poller timing.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Sleep between cycles.
    pub interval: Duration,
    /// Timeout for each query.
    pub timeout: Duration,
}

/// Owning handle on a running poller. Dropping it cancels the poller.
pub struct PollerHandle {
    target: PollTarget,
    cancel: Arc<AtomicBool>,
    rx: Receiver<PollUpdate>,
}

impl PollerHandle {
    /// Collect every update sent since the last call, without blocking.
    pub fn drain(&self) -> Vec<PollUpdate> {
        self.rx.try_iter().collect()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::SeqCst);
        crate::log_debug!("POLL", "Stopped {} poller", self.target.name());
    }
}

/// Start polling `target` on a dedicated thread.
///
/// An in-flight query is not interrupted on cancellation; the query timeout
/// caps how long the thread can outlive its handle.
pub fn spawn(
    target: PollTarget,
    runner: Arc<dyn CommandRunner>,
    config: PollConfig,
) -> PollerHandle {
    let (tx, rx) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);

    crate::log_debug!(
        "POLL",
        "Started {} poller (every {} ms)",
        target.name(),
        config.interval.as_millis()
    );

    thread::spawn(move || run_loop(target, runner.as_ref(), config, &flag, &tx));

    PollerHandle { target, cancel, rx }
}

fn run_loop(
    target: PollTarget,
    runner: &dyn CommandRunner,
    config: PollConfig,
    cancel: &AtomicBool,
    tx: &Sender<PollUpdate>,
) {
    let mut last: Option<PollUpdate> = None;

    while !cancel.load(Ordering::SeqCst) {
        let update = target.interpret(runner.run(target.args(), config.timeout));

        if cancel.load(Ordering::SeqCst) {
            break;
        }

        if last.as_ref() != Some(&update) {
            log_transition(target, &update);
            if tx.send(update.clone()).is_err() {
                break;
            }
            last = Some(update);
        }

        thread::sleep(config.interval);
    }
}

fn log_transition(target: PollTarget, update: &PollUpdate) {
    match update {
        PollUpdate::Status(snap) if snap.state.is_failure() => {
            crate::log_warning!("POLL", "{} query: {}", target.name(), snap.state);
        }
        PollUpdate::Status(snap) => {
            crate::log_debug!("POLL", "status is now {}", snap.state);
        }
        PollUpdate::Settings(snap) => {
            crate::log_debug!(
                "POLL",
                "mode is now {}",
                snap.raw_mode.as_deref().unwrap_or("unknown")
            );
        }
        PollUpdate::SettingsFailed(msg) => {
            crate::log_warning!("POLL", "{} query: {msg}", target.name());
        }
    }
}
