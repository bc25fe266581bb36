//! # femida-bot
//!
//! Application crate: [`BotConfig`], component assembly, [`run_bot`], and the `femida` CLI.

pub mod cli;
mod components;
mod config;
mod runner;

pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{
    database_url_from_env, BotConfig, DEFAULT_DATABASE_URL, DEFAULT_LOG_FILE,
    DEFAULT_MESSAGES_FILE, DEFAULT_SUPPORT_BUTTON_TEXT,
};
pub use runner::{build_bot, run_bot};
