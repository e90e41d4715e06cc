//! Alchemy - Development Tools

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "alchemy-tools")]
#[command(about = "Development tools for alchemy catalogs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a data directory
    Validate {
        /// Path to data directory
        #[arg(default_value = "data")]
        path: PathBuf,
    },
    /// List eras with their item and pivot counts
    Eras {
        /// Path to data directory
        #[arg(default_value = "data")]
        path: PathBuf,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => {
            tracing::info!("Validating data files in: {}", path.display());
            match alchemy_tools::validate::validate_data_directory(&path) {
                Ok(_) => tracing::info!("Validation passed"),
                Err(e) => {
                    tracing::error!("Validation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Eras { path } => match alchemy_data::load_game_data(&path) {
            Ok(data) => {
                for summary in alchemy_tools::eras::era_summaries(&data) {
                    let name = summary.name.as_deref().unwrap_or("(unnamed)");
                    println!(
                        "{:>2}  {:<24} {:>5} items  pivots: {}",
                        summary.era,
                        name,
                        summary.items,
                        summary.pivots.join(", ")
                    );
                }
            }
            Err(e) => {
                tracing::error!("Failed to load {}: {e}", path.display());
                std::process::exit(1);
            }
        },
    }
}
