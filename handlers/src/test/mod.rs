//! Unit test module
//!
//! Handler unit tests live here, separate from source files.
//! Tests interact with handlers via public and pub(crate) APIs; Telegram is replaced by [`mock_bot::MockBot`].

mod persistence_handler_test;

use chrono::Utc;
use femida_core::{CallbackQuery, Chat, Message, MessageDirection, User, MESSAGE_TYPE_TEXT};

/// Builds a test Message with fixed user_id=123, chat_id=456.
pub(crate) fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        content: content.to_string(),
        user: test_user(),
        chat: test_chat(),
        message_type: MESSAGE_TYPE_TEXT.to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
        web_app_data: None,
    }
}

pub(crate) fn create_test_callback(data: &str) -> CallbackQuery {
    CallbackQuery {
        id: "callback_id".to_string(),
        user: test_user(),
        chat: Some(test_chat()),
        data: Some(data.to_string()),
    }
}

fn test_user() -> User {
    User {
        id: 123,
        username: Some("test_user".to_string()),
        first_name: Some("Test".to_string()),
        last_name: None,
    }
}

fn test_chat() -> Chat {
    Chat {
        id: 456,
        chat_type: "private".to_string(),
    }
}
