//! Binary for the Femida support bot.

use anyhow::Result;
use clap::Parser;
use femida_bot::cli::{handle_bookings, handle_messages, handle_stats};
use femida_bot::{load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Stats => {
            init_console_tracing();
            handle_stats().await
        }
        Commands::Messages { limit, chat_id } => {
            init_console_tracing();
            handle_messages(limit, chat_id).await
        }
        Commands::Bookings { limit } => {
            init_console_tracing();
            handle_bookings(limit).await
        }
    }
}

/// Console-only logging for the inspection commands; defaults to warn so tables stay readable.
fn init_console_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_target(false)
        .init();
}
