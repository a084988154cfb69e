//! Shopwise CLI
//!
//! Main entry point for the shopwise command-line tool.
//! Exposes the retrieval core's two entry contracts — filtered search
//! and review summarization — and prints outcome envelopes as JSON.

mod commands;

use clap::{Parser, Subcommand};
use commands::{ItemsCommand, ReviewsCommand, SummarizeCommand};
use shopwise_core::{config::AppConfig, logging, AppResult, SettingsCache};
use std::path::PathBuf;
use std::sync::Arc;

/// Shopwise CLI - conversational shopping retrieval core
#[derive(Parser, Debug)]
#[command(name = "shopwise")]
#[command(about = "Route shopping queries to filtered search and summarization", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "SHOPWISE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Generation provider (gemini, ollama)
    #[arg(short, long, global = true, env = "SHOPWISE_PROVIDER")]
    provider: Option<String>,

    /// Generation model identifier
    #[arg(short, long, global = true, env = "SHOPWISE_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search the item metadata datastore with filters
    Items(ItemsCommand),

    /// Search the review metadata datastore with filters
    Reviews(ReviewsCommand),

    /// Summarize a list of review texts
    Summarize(SummarizeCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.config,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Shopwise CLI starting");
    tracing::debug!("Location: {}", config.location);
    tracing::debug!("Provider: {}", config.provider);

    let settings = Arc::new(SettingsCache::new(config.clone()));

    let command_name = match &cli.command {
        Commands::Items(_) => "items",
        Commands::Reviews(_) => "reviews",
        Commands::Summarize(_) => "summarize",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Items(cmd) => cmd.execute(settings).await,
        Commands::Reviews(cmd) => cmd.execute(settings).await,
        Commands::Summarize(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
