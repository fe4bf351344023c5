use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use snipchain_infrastructure::{ConfigService, TomlChainRepository};
use tracing_subscriber::EnvFilter;

mod commands;
mod prompt;

#[derive(Parser)]
#[command(name = "snipchain")]
#[command(about = "Snipchain - reusable text snippets with chain references and prompts", long_about = None)]
struct Cli {
    /// Chain library file (overrides the configured one)
    #[arg(long, global = true)]
    chains: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List chains
    List {
        /// Only pinned chains
        #[arg(long)]
        pinned: bool,
    },
    /// Show a chain's options
    Show { name: String },
    /// Create a chain from a JSON request
    Add { json: String },
    /// Remove a chain by name
    Remove { name: String },
    /// Install the starter chains
    Seed,
    /// Report broken references, cycles and other library problems
    Check,
    /// Expand a chain or a piece of text
    Resolve(commands::resolve::ResolveArgs),
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env("SNIPCHAIN_LOG")
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    let config = config_service.get_config();
    init_tracing(&config.log_level);

    let chains_file = match cli.chains {
        Some(path) => path,
        None => config_service.chains_file()?,
    };
    tracing::debug!(path = %chains_file.display(), "Using chain library");
    let repo = TomlChainRepository::with_path(chains_file);

    match cli.command {
        Commands::List { pinned } => commands::library::list(&repo, pinned).await?,
        Commands::Show { name } => commands::library::show(&repo, &name).await?,
        Commands::Add { json } => commands::library::add(&repo, &json).await?,
        Commands::Remove { name } => commands::library::remove(&repo, &name).await?,
        Commands::Seed => commands::library::seed(&repo).await?,
        Commands::Check => commands::check::run(&repo).await?,
        Commands::Resolve(args) => commands::resolve::run(&repo, config.resolver, args).await?,
    }

    Ok(())
}
