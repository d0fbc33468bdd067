//! CLI command handlers.
//!
//! Each subcommand runs one query or one mutation against `warp-cli`, prints
//! the outcome and exits. Failures exit with status 1.

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;

use crate::cli::args::Commands;
use crate::config::AppConfig;
use crate::constants;
use crate::state::{SettingsSnapshot, StatusSnapshot};
use crate::warp::{validate_port, Mutation, WarpClient};

/// Where things were resolved from, for `info`.
pub struct RuntimeInfo {
    pub config_dir: PathBuf,
    pub config_dir_source: &'static str,
    pub binary_path: PathBuf,
}

/// Handles CLI commands that don't require the TUI.
///
/// Prints an error and exits with status 1 if the command fails.
pub fn handle_command(
    command: &Commands,
    client: &WarpClient,
    config: &AppConfig,
    info: &RuntimeInfo,
) {
    let outcome = match command {
        Commands::Status { json } => handle_status(client, *json),
        Commands::Connect => handle_mutation(client, Mutation::Connect),
        Commands::Disconnect => handle_mutation(client, Mutation::Disconnect),
        Commands::Mode { mode } => handle_mutation(client, Mutation::SetMode(*mode)),
        Commands::Port { port } => {
            validate_port(port).and_then(|port| handle_mutation(client, Mutation::SetPort(port)))
        }
        Commands::Info => {
            print!("{}", format_info(config, info));
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("{}{e}", constants::CLI_MSG_ERROR);
        std::process::exit(1);
    }
}

/// Run one mutation and report that it was issued.
fn handle_mutation(client: &WarpClient, mutation: Mutation) -> Result<(), String> {
    client.apply(mutation)?;
    println!("{}{}", constants::CLI_MSG_REQUESTED, mutation.describe());
    Ok(())
}

/// JSON shape of `status --json`.
#[derive(Serialize)]
struct StatusReport<'a> {
    status: &'a StatusSnapshot,
    settings: Option<&'a SettingsSnapshot>,
    settings_error: Option<String>,
}

/// Query status and settings once and print them.
///
/// A failed status query is still printed (as `Timeout` / `Error`), then
/// reported as a failure.
fn handle_status(client: &WarpClient, json: bool) -> Result<(), String> {
    let (status, status_failed) = match client.status() {
        Ok(snapshot) => (snapshot, false),
        Err(e) => (StatusSnapshot::failed(e.into()), true),
    };
    let settings = client.settings().map_err(|e| e.to_string());

    let output = if json {
        let report = StatusReport {
            status: &status,
            settings: settings.as_ref().ok(),
            settings_error: settings.as_ref().err().cloned(),
        };
        serde_json::to_string_pretty(&report).map_err(|e| e.to_string())? + "\n"
    } else {
        format_status(&status, &settings)
    };
    print!("{output}");

    if status_failed {
        Err(format!("status query failed: {}", status.state))
    } else {
        Ok(())
    }
}

/// Human-readable status block.
fn format_status(status: &StatusSnapshot, settings: &Result<SettingsSnapshot, String>) -> String {
    let none = constants::MSG_NO_DATA;
    let mut out = String::new();

    let _ = writeln!(out, "Status:     {}", status.state);
    let _ = writeln!(out, "Reason:     {}", status.reason.as_deref().unwrap_or(none));

    match settings {
        Ok(snapshot) => {
            let mode = match (snapshot.mode, snapshot.raw_mode.as_deref()) {
                (Some(mode), _) => format!("{mode} ({})", mode.display_name()),
                (None, Some(raw)) => raw.to_string(),
                (None, None) => none.to_string(),
            };
            let port = snapshot
                .port
                .map_or_else(|| none.to_string(), |p| p.to_string());
            let _ = writeln!(out, "Mode:       {mode}");
            let _ = writeln!(out, "Proxy port: {port}");
        }
        Err(e) => {
            let _ = writeln!(out, "Settings:   unavailable ({e})");
        }
    }
    out
}

fn format_info(config: &AppConfig, info: &RuntimeInfo) -> String {
    let config_file = info.config_dir.join(constants::CONFIG_FILE_NAME);
    let file_state = if config_file.exists() {
        "found"
    } else {
        "not found, using defaults"
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} v{}", constants::APP_NAME, constants::APP_VERSION);
    let _ = writeln!(
        out,
        "Config dir:    {} ({})",
        info.config_dir.display(),
        info.config_dir_source
    );
    let _ = writeln!(out, "Config file:   {} ({file_state})", config_file.display());
    let _ = writeln!(out, "warp-cli:      {}", info.binary_path.display());
    let _ = writeln!(out, "Poll interval: {} ms", config.poll_interval_ms);
    let _ = writeln!(
        out,
        "Timeouts:      query {} s, change {} s",
        config.query_timeout_secs, config.mutation_timeout_secs
    );
    out
}
