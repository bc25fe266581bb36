//! Core types: user, chat, message, callback query, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Username if present, otherwise first name, otherwise "unknown".
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.first_name.as_deref())
            .unwrap_or("unknown")
    }
}

/// Chat (channel or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// Message kind for plain text.
pub const MESSAGE_TYPE_TEXT: &str = "text";
/// Message kind for data submitted from a Web App.
pub const MESSAGE_TYPE_WEB_APP_DATA: &str = "web_app_data";
/// Any other message kind (stickers, photos, service messages).
pub const MESSAGE_TYPE_OTHER: &str = "other";

/// A single message with user, chat, content, and optional Web App payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    /// One of [`MESSAGE_TYPE_TEXT`], [`MESSAGE_TYPE_WEB_APP_DATA`], [`MESSAGE_TYPE_OTHER`].
    pub message_type: String,
    pub direction: MessageDirection,
    pub created_at: DateTime<Utc>,
    /// Raw payload sent by the Web App via `Telegram.WebApp.sendData`.
    pub web_app_data: Option<String>,
}

impl Message {
    /// Splits `/name[@bot] args` into `("name", "args")`. Returns None for non-command content.
    pub fn command(&self) -> Option<(&str, &str)> {
        let text = self.content.trim_start();
        let rest = text.strip_prefix('/')?;
        let (head, args) = match rest.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (rest, ""),
        };
        let name = head.split('@').next().unwrap_or(head);
        if name.is_empty() {
            return None;
        }
        Some((name, args))
    }

    /// True when the message is the given command (case-insensitive, with or without @bot suffix).
    /// Whether a suffixed command is meant for this bot is decided by [`Message::is_addressed_to`].
    pub fn is_command(&self, name: &str) -> bool {
        self.command()
            .map(|(cmd, _)| cmd.eq_ignore_ascii_case(name))
            .unwrap_or(false)
    }

    /// The `bot` in `/name@bot`; None for unsuffixed commands and non-commands.
    pub fn command_addressee(&self) -> Option<&str> {
        self.command()?;
        let head = self
            .content
            .trim_start()
            .split(char::is_whitespace)
            .next()
            .unwrap_or("");
        head.split_once('@')
            .map(|(_, bot)| bot)
            .filter(|bot| !bot.is_empty())
    }

    /// False only for a command suffixed with another bot's username (group chats).
    /// When `bot_username` is unknown every message is accepted.
    pub fn is_addressed_to(&self, bot_username: Option<&str>) -> bool {
        match (self.command_addressee(), bot_username) {
            (Some(addressee), Some(me)) => addressee.eq_ignore_ascii_case(me.trim_start_matches('@')),
            _ => true,
        }
    }

    pub fn is_text(&self) -> bool {
        self.message_type == MESSAGE_TYPE_TEXT
    }
}

/// Direction of the message (from user or from bot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

/// A press on an inline keyboard button.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    /// Transport id used to answer the query.
    pub id: String,
    pub user: User,
    /// Chat of the message carrying the button; None when the message is no longer accessible.
    pub chat: Option<Chat>,
    pub data: Option<String>,
}

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach reply text (e.g. persisted by a handler's `after()`).
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Converts a transport-specific callback query to core [`CallbackQuery`].
pub trait ToCoreCallback: Send + Sync {
    fn to_core(&self) -> CallbackQuery;
}

/// Single handler concept: optional before / handle / after, plus callback handling.
/// Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Name used in chain logs. Defaults to the implementing type's path.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
    /// Processes an inline button press. Default: Ignore.
    async fn handle_callback(
        &self,
        _callback: &CallbackQuery,
    ) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Ignore)
    }
}
