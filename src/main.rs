use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod error;
mod io;
mod runtime;
mod split;

use config::SplitConfig;

#[derive(Parser)]
#[command(name = "pqsplit")]
#[command(about = "Splits a parquet file into near-equal row-wise shards", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a split from YAML configuration
    Run {
        /// Path to split YAML file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a split configuration
    Validate {
        /// Path to split YAML file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config } => {
            let config = SplitConfig::from_yaml_file(&config)?;
            runtime::run_split(&config)?;
        }
        Commands::Validate { config } => {
            let _config = SplitConfig::from_yaml_file(&config)?;
            println!("✓ Split configuration is valid");
        }
        Commands::Version => {
            println!("pqsplit version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
