use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ingests NOAA SWPC space-weather advisories into Postgres.
#[derive(Debug, Clone, Parser)]
#[command(name = "swpc-alerts", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Consume advisory payloads from Kafka (default)
    Consume,
    /// Parse, normalize and store every advisory in a feed file
    Ingest {
        /// Feed JSON file (array of advisories or a single advisory)
        #[arg(short, long, value_name = "PATH")]
        file: PathBuf,
        /// Store into memory instead of Postgres
        #[arg(long)]
        dry_run: bool,
    },
    /// Print parsed advisories as JSON without storing them
    Parse {
        #[arg(short, long, value_name = "PATH")]
        file: PathBuf,
    },
    /// Print stored record counts per family
    Stats,
}

impl Args {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Consume)
    }
}
