//! ecowatch operator CLI.
//!
//! One-shot counterparts of the server's background work: refresh the news
//! cache, run impact enrichment, and seed zones from a JSON file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ecowatch_core::AppConfig;
use ecowatch_jobs::Services;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "ecowatch", about = "Environmental news and risk-zone impact analysis")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the latest environmental news into the cache.
    RefreshNews,
    /// Generate impact analyses for zones that lack one.
    GenerateImpacts {
        /// Regenerate zones that already have an analysis.
        #[arg(long)]
        force: bool,
    },
    /// Insert or update zones from a JSON array file.
    Seed {
        /// Path to the zones file.
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ecowatch: error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let services = Services::open(config).await?;

    match command {
        Commands::RefreshNews => commands::refresh_news(&services).await,
        Commands::GenerateImpacts { force } => commands::generate_impacts(&services, force).await,
        Commands::Seed { file } => commands::seed(&services, &file).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_impacts_force() {
        let cli = Cli::try_parse_from(["ecowatch", "generate-impacts", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::GenerateImpacts { force: true }));

        let cli = Cli::try_parse_from(["ecowatch", "generate-impacts"]).unwrap();
        assert!(matches!(cli.command, Commands::GenerateImpacts { force: false }));
    }

    #[test]
    fn test_parse_seed_requires_file() {
        assert!(Cli::try_parse_from(["ecowatch", "seed"]).is_err());
        let cli = Cli::try_parse_from(["ecowatch", "seed", "data/zones.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Seed { file } if file == PathBuf::from("data/zones.json")));
    }
}
