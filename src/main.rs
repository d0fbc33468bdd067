//! # warp-tui
//!
//! Terminal UI for the Cloudflare WARP client. It drives the `warp-cli`
//! binary: polling its status and settings, and issuing connect,
//! disconnect, mode and proxy port changes.
//!
//! ## Modules
//! - [`app`]: Core application state and logic.
//! - [`cli`]: Command-line argument parsing and one-shot commands.
//! - [`config`]: Configuration management.
//! - [`core`]: Poller and mutation background workers.
//! - [`event`]: Event loop handling.
//! - [`ui`]: TUI rendering and widget definitions.
//! - [`warp`]: `warp-cli` runner, output parsers and client.

mod app;
mod cli;
mod config;
mod constants;
mod core;
mod event;
mod logger;
mod message;
mod state;
mod theme;
mod ui;
mod utils;
mod warp;

use app::App;
use clap::Parser;
use cli::args::Args;
use color_eyre::Result;
use event::{Event, EventHandler};
use warp::WarpClient;

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse arguments
    let args = Args::parse();

    // Determine how config_dir was provided (for `info` command)
    let config_dir_source = match &args.config_dir {
        Some(dir) => {
            let from_env = std::env::var_os(constants::CONFIG_DIR_ENV)
                .is_some_and(|env_val| env_val == dir.as_os_str());
            if from_env {
                "from WARP_TUI_CONFIG_DIR"
            } else {
                "from --config-dir"
            }
        }
        None => "default",
    };

    // Resolve config directory (CLI flag / env > XDG > default)
    let config_dir = config::resolve_config_dir(args.config_dir.as_ref())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to resolve config directory: {e}"))?;

    // Load config.toml (or use defaults)
    let mut app_config = match config::load_config(&config_dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("Fix the file or remove it to use defaults:");
            eprintln!("  nano {}/config.toml", config_dir.display());
            eprintln!("  rm {}/config.toml", config_dir.display());
            std::process::exit(1);
        }
    };
    app_config.apply_overrides(args.interval, args.binary.as_deref());

    logger::configure(&app_config.log_level, app_config.max_log_entries);

    // Nothing talks to warp-cli, and the terminal is untouched, until it is found
    let (client, binary_path) = match warp::client_from_config(&app_config) {
        Ok(found) => found,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    };
    crate::log_info!("APP", "Using {}", binary_path.display());

    // Handle CLI commands (status, connect, mode, info, etc.)
    if let Some(command) = &args.command {
        let info = cli::commands::RuntimeInfo {
            config_dir,
            config_dir_source,
            binary_path,
        };
        cli::commands::handle_command(command, &client, &app_config, &info);
        return Ok(());
    }

    // Run the TUI application
    let terminal = ratatui::init();
    let result = run_tui(terminal, &app_config, client);
    ratatui::restore();

    result
}

/// Runs the main TUI event loop.
fn run_tui(
    mut terminal: ratatui::DefaultTerminal,
    config: &config::AppConfig,
    client: WarpClient,
) -> Result<()> {
    let mut app = App::new(client, config.poll_interval());
    let events = EventHandler::new(config.tick_rate);

    let size = terminal.size()?;
    app.on_resize(size.width, size.height);

    // Initial draw
    app.process_external();
    terminal.draw(|frame| ui::render(frame, &app))?;

    while !app.should_quit {
        match events.next()? {
            Event::Key(key_event) => app.handle_key(key_event),
            Event::Tick => app.on_tick(),
            Event::Resize(width, height) => app.on_resize(width, height),
        }

        // Apply poll results and mutation outcomes before drawing
        app.process_external();
        terminal.draw(|frame| ui::render(frame, &app))?;
    }

    Ok(())
}
