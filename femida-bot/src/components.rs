//! Component factory: builds BotComponents and the handler chain from config. Isolates assembly logic from runner.

use anyhow::Result;
use femida_core::Bot as CoreBot;
use femida_telegram::{TelegramBotAdapter, WebAppLink};
use handler_chain::HandlerChain;
use handlers::{
    BookingHandler, JournalHandler, LoggingHandler, MessageJournal, PersistenceHandler,
    StartHandler, SupportFormHandler, UserIdHandler,
};
use std::sync::Arc;
use storage::{BookingRepository, MessageRepository, SqlitePoolManager};
use tracing::{error, info, instrument};

use super::config::BotConfig;

/// Core dependencies for run_bot; produced by the component factory.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    /// Bot used by handlers to talk to users. TelegramBotAdapter in production.
    pub handler_bot: Arc<dyn CoreBot>,
    pub message_repo: MessageRepository,
    pub booking_repo: BookingRepository,
    pub journal: Arc<MessageJournal>,
    pub web_app: WebAppLink,
}

/// Builds BotComponents. Both repositories share one SQLite pool.
///
/// When `handler_bot_override` is `Some`, handlers send through it instead of Telegram (used by tests).
#[instrument(skip(config, handler_bot_override))]
pub async fn build_bot_components(
    config: &BotConfig,
    handler_bot_override: Option<Arc<dyn CoreBot>>,
) -> Result<BotComponents> {
    let web_app = config.telegram.web_app_link()?;

    let pool_manager = SqlitePoolManager::new(&config.database_url)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                database_url = %config.database_url,
                "Failed to open database"
            );
            anyhow::anyhow!("Failed to open database {}: {}", config.database_url, e)
        })?;
    let message_repo = MessageRepository::with_pool(pool_manager.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize message storage: {}", e))?;
    let booking_repo = BookingRepository::with_pool(pool_manager)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize booking storage: {}", e))?;

    let teloxide_bot = config.telegram.build_bot();
    let handler_bot: Arc<dyn CoreBot> = match handler_bot_override {
        Some(bot) => bot,
        None => Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())),
    };

    let journal = Arc::new(MessageJournal::new(&config.messages_file));

    info!(
        web_app_url = %web_app.as_str(),
        messages_file = %config.messages_file,
        operator_notifications = config.operator_chat_id.is_some(),
        "Bot components ready"
    );

    Ok(BotComponents {
        teloxide_bot,
        handler_bot,
        message_repo,
        booking_repo,
        journal,
        web_app,
    })
}

/// Builds the handler chain: logging → persistence → /start → /id → booking → support form → journal.
pub fn build_handler_chain(config: &BotConfig, components: &BotComponents) -> HandlerChain {
    let bot = components.handler_bot.clone();
    let keyboard = components.web_app.keyboard(&config.support_button_text);

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(PersistenceHandler::new(
            components.message_repo.clone(),
        )))
        .add_handler(Arc::new(StartHandler::new(bot.clone(), keyboard)))
        .add_handler(Arc::new(UserIdHandler::new(bot.clone())))
        .add_handler(Arc::new(BookingHandler::new(
            bot.clone(),
            components.booking_repo.clone(),
            config.operator_chat_id,
        )))
        .add_handler(Arc::new(SupportFormHandler::new(bot.clone())))
        .add_handler(Arc::new(JournalHandler::new(
            bot,
            components.journal.clone(),
        )))
}
