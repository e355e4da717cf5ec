//! CLI command implementations
//!
//! `serve` boot sequence (strict order):
//! 1. Configuration load
//! 2. Store open (or reset with `--debug`); failure aborts before serving
//! 3. Tracing setup
//! 4. HTTP activation

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::storage::ChirpDb;
use crate::validation::ChirpFilter;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            port,
            database,
            debug,
        } => {
            let config = Config::resolve(config.as_deref())?.with_overrides(port, database);
            serve(config, debug)
        }
        Command::Init { config, database } => {
            let config = Config::resolve(config.as_deref())?.with_overrides(None, database);
            init(&config)
        }
    }
}

/// Create an empty database file.
///
/// Refuses to touch a file that already has content.
pub fn init(config: &Config) -> CliResult<()> {
    let path = config.database_path.as_path();
    if has_content(path) {
        return Err(CliError::already_initialized(&path.display().to_string()));
    }

    let db = ChirpDb::open(path)?;

    println!(
        "{}",
        json!({
            "status": "ok",
            "data": {"initialized": true, "database_path": db.path().display().to_string()}
        })
    );
    Ok(())
}

/// Open the store and serve HTTP until interrupted.
pub fn serve(config: Config, debug: bool) -> CliResult<()> {
    log_event(Event::BootStart);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("database_path", &config.database_path.display().to_string()),
            ("addr", &config.http.socket_addr()),
            ("debug", if debug { "true" } else { "false" }),
        ],
    );

    let db = open_store(&config.database_path, debug).map_err(|e| {
        log_event_with_fields(Event::BootFailed, &[("reason", &e.to_string())]);
        e
    })?;

    init_tracing();

    let filter = ChirpFilter::new(config.max_chirp_length);
    let server = HttpServer::with_filter(config.http, Arc::new(db), filter);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::io_error(format!("HTTP server failed: {}", e)))
    })
}

fn open_store(path: &Path, debug: bool) -> CliResult<ChirpDb> {
    let db = if debug {
        ChirpDb::reset(path)?
    } else {
        ChirpDb::open(path)?
    };
    Ok(db)
}

fn has_content(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.len() > 0)
        .unwrap_or(false)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
