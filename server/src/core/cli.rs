use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::config::RecordBackend;
use super::constants::{ENV_BACKEND, ENV_CONFIG, ENV_DEBUG, ENV_FIXTURE, ENV_HOST, ENV_PORT};

#[derive(Parser)]
#[command(name = "figures")]
#[command(version, about = "Reporting API for learning-site analytics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Enable debug mode (logs every resolved filter)
    #[arg(long, global = true, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Record store backend (sqlite or memory)
    #[arg(long, global = true, env = ENV_BACKEND, value_parser = parse_record_backend)]
    pub backend: Option<RecordBackend>,

    /// JSON fixture loaded by the memory backend
    #[arg(long, global = true, env = ENV_FIXTURE)]
    pub fixture: Option<PathBuf>,
}

/// Parse record backend from CLI/env string
fn parse_record_backend(s: &str) -> Result<RecordBackend, String> {
    match s.to_lowercase().as_str() {
        "sqlite" => Ok(RecordBackend::Sqlite),
        "memory" => Ok(RecordBackend::Memory),
        _ => Err(format!(
            "Invalid backend '{}'. Valid options: sqlite, memory",
            s
        )),
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// System maintenance commands
    System {
        #[command(subcommand)]
        command: SystemCommands,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum SystemCommands {
    /// Delete local data directory (database and all imported records). Requires confirmation.
    Prune {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Load a JSON fixture into the SQLite database, replacing records with matching IDs
    Import {
        /// Fixture file with courses, users and site_daily_metrics arrays
        file: PathBuf,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub backend: Option<RecordBackend>,
    pub fixture: Option<PathBuf>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let cli = Cli::parse();
    let config = CliConfig {
        host: cli.host,
        port: cli.port,
        debug: cli.debug,
        config: cli.config,
        backend: cli.backend,
        fixture: cli.fixture,
    };
    (config, cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_backend() {
        assert_eq!(parse_record_backend("sqlite"), Ok(RecordBackend::Sqlite));
        assert_eq!(parse_record_backend("MEMORY"), Ok(RecordBackend::Memory));
        assert!(parse_record_backend("postgres").is_err());
    }

    #[test]
    fn test_cli_import_command() {
        let cli = Cli::try_parse_from(["figures", "system", "import", "data.json", "-p", "9000"])
            .unwrap();
        assert_eq!(cli.port, Some(9000));
        match cli.command {
            Some(Commands::System {
                command: SystemCommands::Import { file },
            }) => assert_eq!(file, PathBuf::from("data.json")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_backend_flag() {
        let cli = Cli::try_parse_from([
            "figures",
            "--backend",
            "memory",
            "--fixture",
            "seed.json",
        ])
        .unwrap();
        assert_eq!(cli.backend, Some(RecordBackend::Memory));
        assert_eq!(cli.fixture, Some(PathBuf::from("seed.json")));
        assert!(cli.command.is_none());
    }
}
