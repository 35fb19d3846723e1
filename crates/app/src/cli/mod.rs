use clap::{Parser, Subcommand};
use marquee_app::{
    config::{ApiConfig, DisplayConfig, LoggingConfig},
    context::AppInitError,
};
use thiserror::Error;

use crate::shutdown::StopSignalError;

mod select;
mod watch;

#[derive(Debug, Parser)]
#[command(name = "marquee", about = "Marquee promotions CLI", long_about = None)]
pub(crate) struct Cli {
    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    /// Promotions API settings.
    #[command(flatten)]
    api: ApiConfig,

    /// Timer and viewport settings.
    #[command(flatten)]
    display: DisplayConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch promotions once and print the records eligible for a slot.
    Select(select::SelectArgs),

    /// Mount the banner, poster and strip and log every render change.
    Watch(watch::WatchArgs),
}

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Init(#[from] AppInitError),

    #[error("failed to fetch promotions: {0}")]
    Fetch(String),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Stop(#[from] StopSignalError),
}

impl Cli {
    /// Load arguments from the command line, the environment and `.env`.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self) -> Result<(), CliError> {
        match self.command {
            Commands::Select(args) => select::run(&self.api, &self.display, args).await,
            Commands::Watch(args) => watch::run(&self.api, &self.display, args).await,
        }
    }
}
