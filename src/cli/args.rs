//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::constants;
use crate::state::Mode;

/// Terminal UI for the Cloudflare WARP client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Override config directory (default: platform config dir, honors `XDG_CONFIG_HOME`)
    #[arg(
        short = 'C',
        long,
        value_name = "DIR",
        env = constants::CONFIG_DIR_ENV,
        global = true
    )]
    pub config_dir: Option<PathBuf>,

    /// Poll interval in milliseconds (overrides `poll_interval_ms`)
    #[arg(short, long, value_name = "MS", global = true)]
    pub interval: Option<u64>,

    /// Name or path of the warp-cli binary (overrides `binary`)
    #[arg(short, long, value_name = "NAME", global = true)]
    pub binary: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the current connection state, mode and proxy port
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Connect to WARP
    Connect,
    /// Disconnect from WARP
    Disconnect,
    /// Switch the operating mode
    Mode {
        /// One of: warp, doh, warp+doh, dot, warp+dot, proxy, tunnel_only
        mode: Mode,
    },
    /// Set the local proxy port (1-65535)
    Port {
        /// Port number
        port: String,
    },
    /// Show version, config directory and the resolved warp-cli path
    Info,
}
