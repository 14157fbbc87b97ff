use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsletter_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "paymentsdive-newsletter")]
#[command(author, version, about = "Build the daily PaymentsDive recap from the news feed")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// TOML configuration file (built-in defaults when omitted)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the feed and write the newsletter JSON (default)
    Generate,
    /// Print the last written newsletter
    Show,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load(cli.config.as_deref())?;

    // Initialize logging; stdout is kept for the command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    tracing::debug!(
        "Feed {} -> {}",
        config.feed.url,
        config.output_path().display()
    );

    match cli.command {
        Some(Commands::Generate) | None => commands::generate::run(&config).await,
        Some(Commands::Show) => commands::show::run(&config),
    }
}
