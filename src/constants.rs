//! Application-wide constants and configuration values.
//!
//! This module defines all static configuration values used throughout
//! warp-tui, including timing defaults, `warp-cli` details and UI messages.

use std::time::Duration;

// === Application Metadata ===

/// Application name and title (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// === External Tool ===

/// Name of the WARP control binary looked up on `PATH`.
pub const DEFAULT_BINARY: &str = "warp-cli";

// === Timing Configuration ===

/// UI refresh rate in milliseconds.
pub const DEFAULT_TICK_RATE: u64 = 250;
/// Sleep between poll cycles in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
/// Timeout for `status` and `settings list`, in seconds.
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;
/// Timeout for `connect`, `disconnect`, `mode` and `proxy port`, in seconds.
pub const DEFAULT_MUTATION_TIMEOUT_SECS: u64 = 10;
/// Lower bound for the poll interval, in milliseconds.
pub const MIN_POLL_INTERVAL_MS: u64 = 100;
/// Lower bound for query and mutation timeouts, in seconds.
pub const MIN_TIMEOUT_SECS: u64 = 1;
/// How often a running child is checked for exit.
pub const CHILD_POLL_INTERVAL: Duration = Duration::from_millis(20);

// === Logging ===

/// Maximum number of log entries kept in memory.
pub const DEFAULT_MAX_LOG_ENTRIES: usize = 500;
/// Minimum log level shown in the activity log.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// === Path Configuration ===

/// Name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "WARP_TUI_CONFIG_DIR";

// === UI Messages ===

pub const MSG_CONNECT_REQUESTED: &str = "Connect requested";
pub const MSG_DISCONNECT_REQUESTED: &str = "Disconnect requested";
pub const MSG_CONNECTED: &str = "WARP connected";
pub const MSG_DISCONNECTED: &str = "WARP disconnected";
pub const MSG_STATUS_FAILED: &str = "warp-cli status: ";
pub const MSG_NO_DATA: &str = "---";
pub const MSG_PORT_PROMPT: &str = "Enter a proxy port (1-65535):";

// === CLI Messages ===

pub const CLI_MSG_ERROR: &str = "Error: ";
pub const CLI_MSG_REQUESTED: &str = "Requested: ";

// === UI Labels & Titles ===

pub const TITLE_STATUS: &str = " Status ";
pub const TITLE_SETTINGS_LIVE: &str = " ● settings live ";
pub const TITLE_LOG: &str = " Activity ";
pub const TITLE_PORT_INPUT: &str = " Proxy Port ";
pub const TITLE_PORT_FOOTER: &str = " [Enter] Apply  [Esc] Cancel ";

// === Error Messages ===

pub const ERR_PORT_EMPTY: &str = "Port cannot be empty";
pub const ERR_PORT_NOT_NUMBER: &str = "Port must be a number";
pub const ERR_PORT_RANGE: &str = "Port must be between 1 and 65535";
