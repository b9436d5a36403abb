//! Time tracker HTTP service.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use time_tracker::cli::{Cli, Command};
use time_tracker::config::ConfigLoader;
use time_tracker::db::Database;
use time_tracker::http::{self, AppState};
use time_tracker::logging::{self, LogTarget};
use time_tracker::{RequestValidator, Tracker};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loader = ConfigLoader::load(cli.config.as_deref())?;
    let source = loader.source().map(|(tier, path)| format!("{tier}: {}", path.display()));
    let mut config = loader.into_config();
    cli.apply_overrides(&mut config);

    logging::init(&LogTarget::parse(&config.logging.target), config.logging.verbose)?;
    if let Some(source) = source {
        info!("Loaded configuration ({source})");
    }

    let db = Database::open_unmigrated(&config.database.path, config.database.busy_timeout_ms)
        .with_context(|| format!("opening database {}", config.database.path.display()))?;

    match cli.command() {
        Command::Migrate => {
            let applied = db.migrate()?;
            info!("Applied {} migration(s)", applied);
            Ok(())
        }
        Command::Serve => {
            if config.database.migrate {
                let applied = db.migrate()?;
                info!("Applied {} migration(s)", applied);
            }

            let state = AppState::new(Tracker::new(db), RequestValidator::new()?);
            let server = http::start_server(state, &config.server.host, config.server.port).await?;

            tokio::signal::ctrl_c().await?;
            info!("Received Ctrl-C, shutting down");
            server.shutdown().await;
            Ok(())
        }
    }
}
