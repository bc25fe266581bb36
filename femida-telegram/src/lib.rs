//! # femida-telegram
//!
//! Telegram layer: adapters, [`femida_core::Bot`] implementation, config, Web App link, dispatcher.
//! Handles only Telegram connectivity and handler-chain execution; no persistence or business logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;
mod web_app;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{to_reply_markup, TelegramBotAdapter};
pub use config::{TelegramConfig, DEFAULT_WEB_APP_URL, TOKEN_PLACEHOLDER};
pub use runner::{run_dispatcher, BotIdentity, UpdateTasks, SHUTDOWN_GRACE};
pub use web_app::WebAppLink;
