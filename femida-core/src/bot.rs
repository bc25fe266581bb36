//! Bot abstraction for sending messages, keyboards, and callback answers.
//!
//! [`Bot`] trait is transport-agnostic; femida-telegram implements it via teloxide.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// One inline keyboard button carrying callback data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub text: String,
    pub data: String,
}

impl InlineButton {
    pub fn new(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            data: data.into(),
        }
    }
}

/// Reply markup attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Reply keyboard with a single button that opens the Web App at `url`.
    WebApp { text: String, url: String },
    /// Inline keyboard; outer vec is rows.
    Inline(Vec<Vec<InlineButton>>),
}

impl Keyboard {
    /// Inline keyboard with one button per row.
    pub fn inline_column(buttons: Vec<InlineButton>) -> Self {
        Keyboard::Inline(buttons.into_iter().map(|b| vec![b]).collect())
    }
}

/// Abstraction for sending messages. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Sends a text message with a reply or inline keyboard.
    async fn send_keyboard(&self, chat: &Chat, text: &str, keyboard: &Keyboard) -> Result<()>;
    /// Answers a callback query so the client stops the loading indicator; `text` is shown as a toast.
    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<()>;
}

/// Masks a Telegram bot token for logging: keeps the public bot id, hides the secret except its last 4 chars.
/// Tokens without a `<id>:<secret>` shape, or with a secret of 8 chars or less, are fully masked.
pub fn mask_token(token: &str) -> String {
    match token.split_once(':') {
        Some((id, secret)) if secret.len() > 8 => {
            let tail = secret.get(secret.len() - 4..).unwrap_or("");
            format!("{}:***{}", id, tail)
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token_keeps_id_and_tail() {
        assert_eq!(
            mask_token("123456789:AAGaqSR2kwaV9ZcsEUVtREysZn0Iz7fiD4M"),
            "123456789:***iD4M"
        );
    }

    #[test]
    fn test_mask_token_short_or_malformed() {
        assert_eq!(mask_token(""), "***");
        assert_eq!(mask_token("process.env.MY_KEY"), "***");
        assert_eq!(mask_token("1:abcdefgh"), "***");
    }

    #[test]
    fn test_inline_column_one_button_per_row() {
        let kb = Keyboard::inline_column(vec![
            InlineButton::new("a", "1"),
            InlineButton::new("b", "2"),
        ]);
        match kb {
            Keyboard::Inline(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[1], vec![InlineButton::new("b", "2")]);
            }
            other => panic!("unexpected keyboard: {:?}", other),
        }
    }
}
