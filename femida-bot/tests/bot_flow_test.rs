//! Integration tests: assembled handler chain driven with core messages and callbacks.
//!
//! Handlers send through a recording mock bot; storage is a temp SQLite file and the journal a temp text file.

use async_trait::async_trait;
use chrono::Utc;
use femida_bot::{build_bot, BotConfig, DEFAULT_SUPPORT_BUTTON_TEXT};
use femida_core::{
    Bot, CallbackQuery, Chat, HandlerResponse, Keyboard, Message, MessageDirection, User,
    MESSAGE_TYPE_TEXT, MESSAGE_TYPE_WEB_APP_DATA,
};
use femida_telegram::TelegramConfig;
use std::sync::{Arc, Mutex};
use storage::{MessageQuery, DIRECTION_RECEIVED, DIRECTION_SENT};

const USER_ID: i64 = 123;
const CHAT_ID: i64 = 456;
const OPERATOR_CHAT_ID: i64 = 777;

#[derive(Default)]
struct RecordingBot {
    sent: Mutex<Vec<(i64, String, Option<Keyboard>)>>,
    answers: Mutex<Vec<Option<String>>>,
}

impl RecordingBot {
    fn sent(&self) -> Vec<(i64, String, Option<Keyboard>)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> femida_core::Result<()> {
        self.sent.lock().unwrap().push((chat.id, text.to_string(), None));
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> femida_core::Result<()> {
        self.send_message(&message.chat, text).await
    }

    async fn send_keyboard(
        &self,
        chat: &Chat,
        text: &str,
        keyboard: &Keyboard,
    ) -> femida_core::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((chat.id, text.to_string(), Some(keyboard.clone())));
        Ok(())
    }

    async fn answer_callback(&self, _callback_id: &str, text: Option<&str>) -> femida_core::Result<()> {
        self.answers.lock().unwrap().push(text.map(String::from));
        Ok(())
    }
}

fn test_config(dir: &tempfile::TempDir) -> BotConfig {
    BotConfig {
        telegram: TelegramConfig::with_token("123456:test-token".to_string()),
        database_url: format!("file:{}", dir.path().join("femida.db").display()),
        log_file: dir.path().join("femida.log").display().to_string(),
        messages_file: dir.path().join("messages.txt").display().to_string(),
        operator_chat_id: Some(OPERATOR_CHAT_ID),
        support_button_text: DEFAULT_SUPPORT_BUTTON_TEXT.to_string(),
    }
}

fn user() -> User {
    User {
        id: USER_ID,
        username: Some("client".to_string()),
        first_name: Some("Client".to_string()),
        last_name: None,
    }
}

fn chat() -> Chat {
    Chat {
        id: CHAT_ID,
        chat_type: "private".to_string(),
    }
}

fn text_message(content: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: user(),
        chat: chat(),
        content: content.to_string(),
        message_type: MESSAGE_TYPE_TEXT.to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
        web_app_data: None,
    }
}

fn callback(data: &str) -> CallbackQuery {
    CallbackQuery {
        id: "cb".to_string(),
        user: user(),
        chat: Some(chat()),
        data: Some(data.to_string()),
    }
}

/// **Test: Chain is assembled with all seven handlers in order.**
#[tokio::test]
async fn test_build_bot_assembles_chain() {
    let dir = tempfile::tempdir().unwrap();
    let bot = Arc::new(RecordingBot::default());

    let (components, chain) = build_bot(&test_config(&dir), Some(bot.clone())).await.unwrap();

    assert_eq!(chain.len(), 7);
    let expected = [
        "LoggingHandler",
        "PersistenceHandler",
        "StartHandler",
        "UserIdHandler",
        "BookingHandler",
        "SupportFormHandler",
        "JournalHandler",
    ];
    for (name, want) in chain.handler_names().iter().zip(expected) {
        assert!(name.ends_with(want), "{} should be {}", name, want);
    }
    assert_eq!(components.web_app.as_str(), "https://vk.com/");
}

/// **Test: Placeholder token is rejected before anything is built.**
#[tokio::test]
async fn test_build_bot_rejects_placeholder_token() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&dir);
    config.telegram.bot_token = "process.env.MY_KEY".to_string();

    let result = build_bot(&config, Some(Arc::new(RecordingBot::default()))).await;

    assert!(result.is_err());
    assert!(!dir.path().join("femida.db").exists());
}

/// **Test: /start shows the Web App button, and both the command and the greeting are persisted.**
#[tokio::test]
async fn test_start_flow_persists_both_directions() {
    let dir = tempfile::tempdir().unwrap();
    let bot = Arc::new(RecordingBot::default());
    let (components, chain) = build_bot(&test_config(&dir), Some(bot.clone())).await.unwrap();

    let response = chain.handle(&text_message("/start")).await.unwrap();

    assert_eq!(
        response,
        HandlerResponse::Reply("Hello, please describe your problem".to_string())
    );
    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].2,
        Some(Keyboard::WebApp {
            text: "Contact technical support".to_string(),
            url: "https://vk.com/".to_string(),
        })
    );

    let stats = components.message_repo.get_stats().await.unwrap();
    assert_eq!(stats.received_messages, 1);
    assert_eq!(stats.sent_messages, 1);
    assert!(!dir.path().join("messages.txt").exists());
}

/// **Test: Plain text lands in the journal and is acknowledged.**
#[tokio::test]
async fn test_plain_text_goes_to_journal() {
    let dir = tempfile::tempdir().unwrap();
    let bot = Arc::new(RecordingBot::default());
    let (_components, chain) = build_bot(&test_config(&dir), Some(bot.clone())).await.unwrap();

    chain.handle(&text_message("The app crashes on login")).await.unwrap();

    let journal = std::fs::read_to_string(dir.path().join("messages.txt")).unwrap();
    assert_eq!(journal, "The app crashes on login\n");
    assert_eq!(bot.sent()[0].1, "I received your message. It has been saved.");
}

/// **Test: Web App form data is echoed and stored with its raw payload.**
#[tokio::test]
async fn test_web_app_form_is_echoed_and_stored() {
    let dir = tempfile::tempdir().unwrap();
    let bot = Arc::new(RecordingBot::default());
    let (components, chain) = build_bot(&test_config(&dir), Some(bot.clone())).await.unwrap();

    let payload = r#"{"name":"Ann","email":"ann@example.com","message":"No sound"}"#;
    let mut message = text_message("Contact technical support");
    message.message_type = MESSAGE_TYPE_WEB_APP_DATA.to_string();
    message.web_app_data = Some(payload.to_string());

    chain.handle(&message).await.unwrap();

    assert_eq!(
        bot.sent()[0].1,
        "Name: Ann. Email: ann@example.com. Message: No sound"
    );
    let received = components
        .message_repo
        .get_messages(&MessageQuery {
            direction: Some(DIRECTION_RECEIVED.to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(received[0].content, payload);
    let sent = components
        .message_repo
        .get_messages(&MessageQuery {
            direction: Some(DIRECTION_SENT.to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(sent.len(), 1);
}

/// **Test: Full booking flow: /book, open slots, confirm the first one.**
#[tokio::test]
async fn test_booking_flow_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let bot = Arc::new(RecordingBot::default());
    let (components, chain) = build_bot(&test_config(&dir), Some(bot.clone())).await.unwrap();

    chain.handle(&text_message("/book")).await.unwrap();
    let response = chain.handle_callback(&callback("book_session")).await.unwrap();
    assert_eq!(response, HandlerResponse::Stop);

    let sent = bot.sent();
    let Some(Keyboard::Inline(rows)) = sent[1].2.clone() else {
        panic!("slot list must be an inline keyboard");
    };
    assert_eq!(rows.len(), 5);
    let first_slot = rows[0][0].clone();

    let response = chain.handle_callback(&callback(&first_slot.data)).await.unwrap();
    assert_eq!(
        response,
        HandlerResponse::Reply(format!("Your session is booked for {}.", first_slot.text))
    );

    let bookings = components.booking_repo.list_by_user(USER_ID).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(
        bookings[0].booking_time.format("%Y-%m-%d %H:%M").to_string(),
        first_slot.text
    );

    let sent = bot.sent();
    assert!(sent
        .iter()
        .any(|(chat_id, text, _)| *chat_id == OPERATOR_CHAT_ID && text.contains("(ID: 123)")));
    assert!(bot
        .answers
        .lock()
        .unwrap()
        .contains(&Some("Your booking is confirmed!".to_string())));
}

/// **Test: Callbacks no handler recognises are ignored.**
#[tokio::test]
async fn test_unknown_callback_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let bot = Arc::new(RecordingBot::default());
    let (_components, chain) = build_bot(&test_config(&dir), Some(bot.clone())).await.unwrap();

    let response = chain.handle_callback(&callback("something_else")).await.unwrap();

    assert_eq!(response, HandlerResponse::Ignore);
    assert!(bot.sent().is_empty());
}
