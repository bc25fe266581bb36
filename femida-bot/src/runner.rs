use anyhow::Result;
use femida_core::{init_tracing, Bot as CoreBot};
use femida_telegram::run_dispatcher;
use handler_chain::HandlerChain;
use std::sync::Arc;
use tracing::{info, instrument};

use super::components::{build_bot_components, build_handler_chain, BotComponents};
use super::config::BotConfig;

/// Main entry: validate config, init logging, build components and chain, then run the dispatcher until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        web_app_url = %config.telegram.web_app_url,
        "Initializing bot"
    );

    let (components, handler_chain) = build_bot(&config, None).await?;

    info!(handlers = handler_chain.len(), "Bot started successfully");

    run_dispatcher(components.teloxide_bot, handler_chain).await
}

/// Builds components and handler chain without starting the dispatcher. Used by integration tests that inject a mock bot
/// and drive the chain with core messages and callbacks.
#[instrument(skip(config, handler_bot_override))]
pub async fn build_bot(
    config: &BotConfig,
    handler_bot_override: Option<Arc<dyn CoreBot>>,
) -> Result<(BotComponents, HandlerChain)> {
    config.validate()?;
    let components = build_bot_components(config, handler_bot_override).await?;
    let handler_chain = build_handler_chain(config, &components);
    Ok((components, handler_chain))
}
