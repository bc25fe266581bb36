//! Telegram connection config: bot token, Web App link, optional Bot API URL.
//! Loaded from environment: MY_KEY (or BOT_TOKEN), WEB_APP_URL, TELEGRAM_API_URL (or TELOXIDE_API_URL).

use anyhow::{bail, Result};
use femida_core::mask_token;
use std::env;
use teloxide::Bot;
use tracing::{error, info};

use crate::web_app::WebAppLink;

/// Web App opened by the support button when WEB_APP_URL is not set.
pub const DEFAULT_WEB_APP_URL: &str = "https://vk.com/";

/// Literal left in place of a real token by an unfinished setup; never a valid token.
pub const TOKEN_PLACEHOLDER: &str = "process.env.MY_KEY";

/// Telegram connection config.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub web_app_url: String,
    pub telegram_api_url: Option<String>,
}

impl TelegramConfig {
    /// Loads from environment. `token` overrides MY_KEY / BOT_TOKEN when provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => match env::var("MY_KEY").or_else(|_| env::var("BOT_TOKEN")) {
                Ok(t) => t,
                Err(_) => bail!("MY_KEY (or BOT_TOKEN) not set"),
            },
        };
        let web_app_url =
            env::var("WEB_APP_URL").unwrap_or_else(|_| DEFAULT_WEB_APP_URL.to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        Ok(Self {
            bot_token,
            web_app_url,
            telegram_api_url,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Uses the given token and the default Web App; no API URL override.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            web_app_url: DEFAULT_WEB_APP_URL.to_string(),
            telegram_api_url: None,
        }
    }

    /// Fails fast on an empty or placeholder token, a non-https Web App URL, or a malformed API URL.
    pub fn validate(&self) -> Result<()> {
        let token = self.bot_token.trim();
        if token.is_empty() {
            bail!("Bot token is empty; set MY_KEY in .env or pass --token");
        }
        if token == TOKEN_PLACEHOLDER {
            bail!(
                "Bot token is the unresolved placeholder {:?}; set MY_KEY to the token from @BotFather",
                TOKEN_PLACEHOLDER
            );
        }
        self.web_app_link()?;
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }

    pub fn web_app_link(&self) -> Result<WebAppLink> {
        Ok(WebAppLink::parse(&self.web_app_url)?)
    }

    /// Creates the teloxide client, pointing it at TELEGRAM_API_URL when set.
    pub fn build_bot(&self) -> Bot {
        info!(token = %mask_token(&self.bot_token), "Creating Telegram bot client");
        let bot = Bot::new(self.bot_token.clone());
        match self.telegram_api_url {
            Some(ref url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            },
            None => bot,
        }
    }
}
