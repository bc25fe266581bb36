//! Application config: Telegram connection plus storage, journal, logging and booking settings.

use anyhow::{bail, Context, Result};
use femida_telegram::TelegramConfig;
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "file:./femida.db";
pub const DEFAULT_LOG_FILE: &str = "logs/femida.log";
pub const DEFAULT_MESSAGES_FILE: &str = "messages.txt";
pub const DEFAULT_SUPPORT_BUTTON_TEXT: &str = "Contact technical support";

/// Femida bot config, loaded from environment (after `.env` is applied by dotenvy).
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub database_url: String,
    pub log_file: String,
    /// Plain-text journal of received messages.
    pub messages_file: String,
    /// Chat notified about new bookings; None disables the notification.
    pub operator_chat_id: Option<i64>,
    pub support_button_text: String,
}

impl BotConfig {
    /// Loads from environment. `token` overrides MY_KEY / BOT_TOKEN when provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::load(token)?;
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let messages_file =
            env::var("MESSAGES_FILE").unwrap_or_else(|_| DEFAULT_MESSAGES_FILE.to_string());
        let support_button_text = env::var("SUPPORT_BUTTON_TEXT")
            .unwrap_or_else(|_| DEFAULT_SUPPORT_BUTTON_TEXT.to_string());

        Ok(Self {
            telegram,
            database_url: database_url_from_env(),
            log_file,
            messages_file,
            operator_chat_id: operator_chat_id_from_env()?,
            support_button_text,
        })
    }

    /// Fails fast on invalid Telegram settings or empty paths.
    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        if self.database_url.trim().is_empty() {
            bail!("DATABASE_URL is set but empty");
        }
        if self.messages_file.trim().is_empty() {
            bail!("MESSAGES_FILE is set but empty");
        }
        if self.support_button_text.trim().is_empty() {
            bail!("SUPPORT_BUTTON_TEXT is set but empty");
        }
        Ok(())
    }
}

/// DATABASE_URL or the default SQLite file. Used by the CLI commands that need no token.
pub fn database_url_from_env() -> String {
    env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

fn operator_chat_id_from_env() -> Result<Option<i64>> {
    let raw = match env::var("OPERATOR_CHAT_ID").or_else(|_| env::var("TAROLOGIST_CHAT_ID")) {
        Ok(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(None),
    };
    let id = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("OPERATOR_CHAT_ID must be an integer chat id, got {:?}", raw))?;
    Ok(Some(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "MY_KEY",
            "BOT_TOKEN",
            "WEB_APP_URL",
            "TELEGRAM_API_URL",
            "TELOXIDE_API_URL",
            "DATABASE_URL",
            "LOG_FILE",
            "MESSAGES_FILE",
            "OPERATOR_CHAT_ID",
            "TAROLOGIST_CHAT_ID",
            "SUPPORT_BUTTON_TEXT",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        clear_env();
        env::set_var("MY_KEY", "123:secret");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.telegram.bot_token, "123:secret");
        assert_eq!(config.telegram.web_app_url, "https://vk.com/");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.log_file, DEFAULT_LOG_FILE);
        assert_eq!(config.messages_file, DEFAULT_MESSAGES_FILE);
        assert_eq!(config.support_button_text, DEFAULT_SUPPORT_BUTTON_TEXT);
        assert!(config.operator_chat_id.is_none());
        assert!(config.validate().is_ok());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_config_with_overrides() {
        clear_env();
        env::set_var("DATABASE_URL", "sqlite::memory:");
        env::set_var("LOG_FILE", "/tmp/femida-test.log");
        env::set_var("MESSAGES_FILE", "/tmp/messages.txt");
        env::set_var("TAROLOGIST_CHAT_ID", "-100200");
        env::set_var("SUPPORT_BUTTON_TEXT", "Help");

        let config = BotConfig::load(Some("999:cli".to_string())).unwrap();

        assert_eq!(config.telegram.bot_token, "999:cli");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.log_file, "/tmp/femida-test.log");
        assert_eq!(config.messages_file, "/tmp/messages.txt");
        assert_eq!(config.operator_chat_id, Some(-100200));
        assert_eq!(config.support_button_text, "Help");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_rejects_non_integer_operator_chat() {
        clear_env();
        env::set_var("MY_KEY", "123:secret");
        env::set_var("OPERATOR_CHAT_ID", "@operator");

        let err = BotConfig::load(None).unwrap_err();

        assert!(err.to_string().contains("OPERATOR_CHAT_ID"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_without_token_fails() {
        clear_env();
        assert!(BotConfig::load(None).is_err());
    }

    #[test]
    #[serial]
    fn test_validate_rejects_placeholder_token() {
        clear_env();
        env::set_var("MY_KEY", "process.env.MY_KEY");

        let config = BotConfig::load(None).unwrap();

        assert!(config.validate().is_err());
        clear_env();
    }
}
