//! Wraps teloxide::Bot and implements [`femida_core::Bot`]. Production code sends messages via Telegram; tests can substitute another Bot impl.

use async_trait::async_trait;
use femida_core::{Bot as CoreBot, Chat, FemidaError, Keyboard, Message, Result};
use teloxide::prelude::*;
use teloxide::types::{
    ButtonRequest, CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup,
    KeyboardButton, KeyboardMarkup, ReplyMarkup,
};

use crate::web_app::WebAppLink;

/// Thin wrapper around teloxide::Bot that implements femida-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

/// Converts a core keyboard into Telegram reply markup.
pub fn to_reply_markup(keyboard: &Keyboard) -> Result<ReplyMarkup> {
    match keyboard {
        Keyboard::WebApp { text, url } => {
            let link = WebAppLink::parse(url).map_err(|e| FemidaError::Bot(e.to_string()))?;
            let button = KeyboardButton::new(text.clone()).request(ButtonRequest::WebApp(link.info()));
            Ok(ReplyMarkup::Keyboard(KeyboardMarkup::new(vec![vec![button]])))
        }
        Keyboard::Inline(rows) => {
            let rows = rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|b| InlineKeyboardButton::callback(b.text.clone(), b.data.clone()))
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>();
            Ok(ReplyMarkup::InlineKeyboard(InlineKeyboardMarkup::new(rows)))
        }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| FemidaError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn send_keyboard(&self, chat: &Chat, text: &str, keyboard: &Keyboard) -> Result<()> {
        let markup = to_reply_markup(keyboard)?;
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .reply_markup(markup)
            .await
            .map_err(|e| FemidaError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        let request = self
            .bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()));
        let request = match text {
            Some(text) => request.text(text.to_string()),
            None => request,
        };
        request
            .await
            .map_err(|e| FemidaError::Bot(e.to_string()))?;
        Ok(())
    }
}
