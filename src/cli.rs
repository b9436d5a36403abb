//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

/// Time tracker HTTP service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to database file (overrides config)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Listen port (overrides config)
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr, or filename (overrides config)
    #[arg(short, long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default if no subcommand given)
    Serve,

    /// Apply pending database migrations and exit
    Migrate,
}

impl Cli {
    /// Apply command-line overrides on top of loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(db_path) = &self.database {
            config.database.path = db_path.clone();
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(log) = &self.log {
            config.logging.target = log.clone();
        }
        if self.verbose {
            config.logging.verbose = true;
        }
    }

    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::parse_from(["time-tracker"]);
        assert_eq!(cli.command(), Command::Serve);
    }

    #[test]
    fn overrides_apply_over_config() {
        let cli = Cli::parse_from([
            "time-tracker",
            "--port",
            "9001",
            "--database",
            "/tmp/t.db",
            "-v",
            "migrate",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(cli.command(), Command::Migrate);
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.path, PathBuf::from("/tmp/t.db"));
        assert!(config.logging.verbose);
    }
}
