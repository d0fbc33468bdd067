//! Bridge to the `warp-cli` binary.
//!
//! Queries (`status`, `settings list`) and mutations (`connect`,
//! `disconnect`, `mode`, `proxy port`) all go through a [`CommandRunner`],
//! so everything above this module can be tested without the real tool.

pub mod parser;
pub mod runner;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::constants;
use crate::state::{Mode, SettingsSnapshot, StatusSnapshot};

pub use parser::{parse_settings, parse_status};
pub use runner::{CommandRunner, RunError, SystemCommandRunner};

/// A state-changing `warp-cli` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Connect,
    Disconnect,
    SetMode(Mode),
    SetPort(u16),
}

impl Mutation {
    /// Arguments passed to `warp-cli`.
    #[must_use]
    pub fn args(self) -> Vec<String> {
        match self {
            Self::Connect => vec!["connect".into()],
            Self::Disconnect => vec!["disconnect".into()],
            Self::SetMode(mode) => vec!["mode".into(), mode.cli_name().into()],
            Self::SetPort(port) => vec!["proxy".into(), "port".into(), port.to_string()],
        }
    }

    /// Short description for logs and toasts.
    #[must_use]
    pub fn describe(self) -> String {
        match self {
            Self::Connect => "connect".to_string(),
            Self::Disconnect => "disconnect".to_string(),
            Self::SetMode(mode) => format!("set mode to {mode}"),
            Self::SetPort(port) => format!("set proxy port to {port}"),
        }
    }

    /// Connect and disconnect report failures to the user; settings
    /// changes only record them.
    #[must_use]
    pub const fn is_connection_change(self) -> bool {
        matches!(self, Self::Connect | Self::Disconnect)
    }
}

/// Handle on the external tool shared by the poller, the mutator and the CLI.
#[derive(Clone)]
pub struct WarpClient {
    runner: Arc<dyn CommandRunner>,
    query_timeout: Duration,
    mutation_timeout: Duration,
}

impl WarpClient {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        query_timeout: Duration,
        mutation_timeout: Duration,
    ) -> Self {
        Self {
            runner,
            query_timeout,
            mutation_timeout,
        }
    }

    /// The runner, for spawning pollers against the same binary.
    pub fn runner(&self) -> Arc<dyn CommandRunner> {
        Arc::clone(&self.runner)
    }

    pub const fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Run `warp-cli status` once.
    ///
    /// # Errors
    ///
    /// Returns the runner error if the query timed out or failed to run.
    pub fn status(&self) -> Result<StatusSnapshot, RunError> {
        self.runner
            .run(vec!["status".into()], self.query_timeout)
            .map(|out| parse_status(&out))
    }

    /// Run `warp-cli settings list` once.
    ///
    /// # Errors
    ///
    /// Returns the runner error if the query timed out or failed to run.
    pub fn settings(&self) -> Result<SettingsSnapshot, RunError> {
        self.runner
            .run(vec!["settings".into(), "list".into()], self.query_timeout)
            .map(|out| parse_settings(&out))
    }

    /// Issue one mutation and discard its output.
    ///
    /// Nothing is retried. Success only means the command ran; the next poll
    /// is what confirms the new state.
    ///
    /// # Errors
    ///
    /// Returns a printable message if the command timed out or failed to run.
    pub fn apply(&self, mutation: Mutation) -> Result<(), String> {
        crate::log_debug!("WARP", "Running: {}", mutation.args().join(" "));
        self.runner
            .run(mutation.args(), self.mutation_timeout)
            .map(|_| ())
            .map_err(|e| format!("Failed to {}: {e}", mutation.describe()))
    }
}

/// Validate a proxy port typed by the user.
///
/// # Errors
///
/// Returns a printable message unless the input is an integer in `1..=65535`.
pub fn validate_port(input: &str) -> Result<u16, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(constants::ERR_PORT_EMPTY.to_string());
    }
    if !input.chars().all(|c| c.is_ascii_digit()) {
        return Err(constants::ERR_PORT_NOT_NUMBER.to_string());
    }
    match input.parse::<u16>() {
        Ok(port) if port >= 1 => Ok(port),
        _ => Err(constants::ERR_PORT_RANGE.to_string()),
    }
}

/// Locate `binary` on `PATH`.
///
/// # Errors
///
/// Returns the startup message shown when the tool is missing.
pub fn ensure_installed(binary: &str) -> Result<PathBuf, String> {
    which::which(binary).map_err(|_| format!("Error: {binary} is not installed"))
}

/// Check the configured binary is installed and build a client for it.
///
/// Nothing that talks to `warp-cli` (pollers, mutations, subcommands) can
/// exist without the client returned here.
///
/// # Errors
///
/// Returns the startup message from [`ensure_installed`].
pub fn client_from_config(config: &AppConfig) -> Result<(WarpClient, PathBuf), String> {
    let path = ensure_installed(&config.binary)?;
    let client = WarpClient::new(
        Arc::new(SystemCommandRunner::new(path.clone())),
        config.query_timeout(),
        config.mutation_timeout(),
    );
    Ok((client, path))
}
