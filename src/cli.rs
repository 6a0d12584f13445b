use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sports-staging-loader")]
#[command(version, about = "Cleanse and load staged sports analytics records into SQLite")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load staging CSV files into the production warehouse
    Load {
        /// Directory containing staging CSV files (stg_leagues.csv, ...)
        staging_dir: PathBuf,

        /// Warehouse SQLite database path (created if missing)
        warehouse_db: PathBuf,

        /// Only load these entities, plus their FK parents (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        include: Option<Vec<String>>,

        /// Skip these entities and everything depending on them (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,

        /// Print the load reports as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print per-entity row counts for a warehouse
    Counts {
        /// Warehouse SQLite database path
        warehouse_db: PathBuf,
    },

    /// List all entity names in load order
    ListEntities,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
