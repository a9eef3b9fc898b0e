use crate::errors::AppResult;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Farcaster cast launcher
#[derive(Parser)]
#[command(name = "cast-launcher")]
#[command(about = "Launch tokens from Farcaster casts")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the frame, transaction and webhook HTTP service
    Serve(commands::serve::ServeCommand),
    /// Show the launch state of a cast
    Resolve(commands::resolve::ResolveCommand),
    /// Build the launch transaction for a cast
    BuildLaunch(commands::launch::BuildLaunchCommand),
    /// Sign an address list with the launch key
    SignAddresses(commands::sign::SignAddressesCommand),
    /// Extract the ticker from a launch directive
    ExtractTicker(commands::ticker::ExtractTickerCommand),
}

pub async fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "info" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Serve(command) => command.run(config_path).await,
        Commands::Resolve(command) => command.run(config_path).await,
        Commands::BuildLaunch(command) => command.run(config_path).await,
        Commands::SignAddresses(command) => command.run(config_path),
        Commands::ExtractTicker(command) => command.run(),
    }
}
