//! Command-line interface definitions and helpers.
//!
//! This module contains CLI argument parsing and subcommand handlers.

mod args;
mod commands;

pub use args::{Args, Command, ConfigAction};
pub use commands::{
    handle_config_action, resolve_input_dir, resolve_settings, run_conversion, RunError,
};
