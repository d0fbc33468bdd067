//! Command-line interface module.
//!
//! Provides argument parsing and the one-shot commands that run without the TUI.

pub mod args;
pub mod commands;
