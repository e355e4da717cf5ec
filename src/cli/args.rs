//! CLI argument definitions using clap
//!
//! Commands:
//! - chirpy serve [--config <path>] [--port <n>] [--database <path>] [--debug]
//! - chirpy init  [--config <path>] [--database <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// chirpy - a small durable public-message service
#[derive(Parser, Debug)]
#[command(name = "chirpy")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP service
    Serve {
        /// Path to configuration file (default: ./chirpy.json if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overrides the config file
        #[arg(long)]
        port: Option<u16>,

        /// Backing database file, overrides the config file
        #[arg(long)]
        database: Option<PathBuf>,

        /// Delete the database before starting
        #[arg(long)]
        debug: bool,
    },

    /// Create an empty database file and exit
    Init {
        /// Path to configuration file (default: ./chirpy.json if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Backing database file, overrides the config file
        #[arg(long)]
        database: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from([
            "chirpy",
            "serve",
            "--port",
            "9000",
            "--database",
            "/tmp/db.json",
            "--debug",
        ]);

        match cli.command {
            Command::Serve {
                config,
                port,
                database,
                debug,
            } => {
                assert!(config.is_none());
                assert_eq!(port, Some(9000));
                assert_eq!(database, Some(PathBuf::from("/tmp/db.json")));
                assert!(debug);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["chirpy"]).is_err());
    }
}
