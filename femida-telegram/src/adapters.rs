//! Adapters from Telegram (teloxide) types to femida_core types.
//! Depends only on teloxide and femida_core type definitions.

use femida_core::{
    CallbackQuery, Chat, Message, MessageDirection, ToCoreCallback, ToCoreMessage, ToCoreUser,
    User, MESSAGE_TYPE_OTHER, MESSAGE_TYPE_TEXT, MESSAGE_TYPE_WEB_APP_DATA,
};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn chat_to_core(chat: &teloxide::types::Chat) -> Chat {
    let chat_type = if chat.is_private() {
        "private"
    } else if chat.is_supergroup() {
        "supergroup"
    } else if chat.is_group() {
        "group"
    } else if chat.is_channel() {
        "channel"
    } else {
        "unknown"
    };
    Chat {
        id: chat.id.0,
        chat_type: chat_type.to_string(),
    }
}

fn anonymous_user() -> User {
    User {
        id: 0,
        username: None,
        first_name: None,
        last_name: None,
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
/// Web App submissions keep the raw payload in `web_app_data` and the button text as content.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        let (message_type, content, web_app_data) = match (msg.web_app_data(), msg.text()) {
            (Some(data), _) => (
                MESSAGE_TYPE_WEB_APP_DATA,
                data.button_text.clone(),
                Some(data.data.clone()),
            ),
            (None, Some(text)) => (MESSAGE_TYPE_TEXT, text.to_string(), None),
            (None, None) => (MESSAGE_TYPE_OTHER, String::new(), None),
        };

        Message {
            id: msg.id.to_string(),
            user: msg
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(anonymous_user),
            chat: chat_to_core(&msg.chat),
            content,
            message_type: message_type.to_string(),
            direction: MessageDirection::Incoming,
            created_at: msg.date,
            web_app_data,
        }
    }
}

/// Wraps a teloxide CallbackQuery for conversion to core [`CallbackQuery`].
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> ToCoreCallback for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> CallbackQuery {
        let q = self.0;
        CallbackQuery {
            id: q.id.0.clone(),
            user: TelegramUserWrapper(&q.from).to_core(),
            chat: q.message.as_ref().map(|m| chat_to_core(m.chat())),
            data: q.data.clone(),
        }
    }
}
