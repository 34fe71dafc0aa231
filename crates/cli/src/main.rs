//! clai CLI — the main entry point.
//!
//! Commands:
//! - `run [model]`   — Start an interactive chat session
//! - `list-models`   — Show the provider's models and context window sizes

use clap::{Parser, Subcommand};

mod commands;
mod input;

#[derive(Parser)]
#[command(
    name = "clai",
    about = "clai — LLM chat with a sliding, token-bounded context window",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Run {
        /// Model to chat with (defaults to the configured model)
        model: Option<String>,
    },

    /// List available models and their context window sizes
    ListModels,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run { model } => commands::run::run(model).await?,
        Commands::ListModels => commands::models::run().await?,
    }

    Ok(())
}
