//! docchat CLI
//!
//! Main entry point for the docchat command-line tool.
//! Chat with a single document: answers are grounded in retrieved
//! passages when possible and labeled with their provenance.

mod commands;
mod document;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand};
use docchat_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// docchat - conversational question answering over a document
#[derive(Parser, Debug)]
#[command(name = "docchat")]
#[command(about = "Chat with a document, with provenance-labeled answers", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the document to chat over (plain text)
    #[arg(short, long, global = true, env = "DOCCHAT_DOCUMENT")]
    document: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "DOCCHAT_CONFIG")]
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

    /// LLM provider (ollama, openai, gemini)
    #[arg(short, long, global = true, env = "DOCCHAT_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "DOCCHAT_MODEL")]
    model: Option<String>,

    /// Provider endpoint override
    #[arg(long, global = true, env = "DOCCHAT_ENDPOINT")]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask a single question and exit
    Ask(AskCommand),

    /// Interactive chat session
    Chat(ChatCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from file and environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.document,
        cli.config,
        cli.provider,
        cli.model,
        cli.endpoint,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("docchat starting");
    tracing::debug!("Document: {:?}", config.document);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    config.validate()?;

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Chat(_) => "chat",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
