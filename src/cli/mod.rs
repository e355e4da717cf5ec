//! CLI module for chirpy
//!
//! Provides command-line interface for:
//! - serve: Open the store and run the HTTP service
//! - init: Create an empty database file

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve};
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
