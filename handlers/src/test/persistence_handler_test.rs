//! Unit tests for PersistenceHandler: before() stores the incoming message, after() stores replies.
//!
//! Uses in-memory SQLite (sqlite::memory:); no external DB.

use super::create_test_message;
use crate::persistence_handler::PersistenceHandler;
use femida_core::{Handler, HandlerResponse, MessageDirection, MESSAGE_TYPE_WEB_APP_DATA};
use storage::{MessageQuery, MessageRepository, DIRECTION_RECEIVED, DIRECTION_SENT};

async fn repo() -> MessageRepository {
    MessageRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository")
}

/// **Test: before() persists the message as received and continues the chain.**
#[tokio::test]
async fn test_persistence_handler_before() {
    let repo = repo().await;
    let handler = PersistenceHandler::new(repo.clone());

    let result = handler.before(&create_test_message("Hello")).await;

    assert!(result.unwrap());
    let stored = repo.get_messages(&MessageQuery::default()).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].content, "Hello");
    assert_eq!(stored[0].direction, DIRECTION_RECEIVED);
    assert_eq!(stored[0].username.as_deref(), Some("test_user"));
}

/// **Test: before() with Outgoing direction persists with direction "sent".**
#[tokio::test]
async fn test_persistence_handler_before_outgoing() {
    let repo = repo().await;
    let handler = PersistenceHandler::new(repo.clone());

    let mut message = create_test_message("Outgoing");
    message.direction = MessageDirection::Outgoing;
    assert!(handler.before(&message).await.unwrap());

    let stats = repo.get_stats().await.unwrap();
    assert_eq!(stats.sent_messages, 1);
    assert_eq!(stats.received_messages, 0);
}

/// **Test: Web App submissions are stored with the raw JSON payload.**
#[tokio::test]
async fn test_persistence_handler_stores_web_app_payload() {
    let repo = repo().await;
    let handler = PersistenceHandler::new(repo.clone());

    let mut message = create_test_message("Contact technical support");
    message.message_type = MESSAGE_TYPE_WEB_APP_DATA.to_string();
    message.web_app_data = Some(r#"{"name":"A"}"#.to_string());
    handler.before(&message).await.unwrap();

    let stored = repo.get_messages(&MessageQuery::default()).await.unwrap();
    assert_eq!(stored[0].content, r#"{"name":"A"}"#);
    assert_eq!(stored[0].message_type, MESSAGE_TYPE_WEB_APP_DATA);
}

/// **Test: after() stores a Reply as a sent message and ignores other responses.**
#[tokio::test]
async fn test_persistence_handler_after_saves_reply_only() {
    let repo = repo().await;
    let handler = PersistenceHandler::new(repo.clone());
    let message = create_test_message("Hi");

    handler.after(&message, &HandlerResponse::Stop).await.unwrap();
    handler
        .after(&message, &HandlerResponse::Reply("Your user_id is: 456".to_string()))
        .await
        .unwrap();

    let query = MessageQuery {
        direction: Some(DIRECTION_SENT.to_string()),
        ..Default::default()
    };
    let sent = repo.get_messages(&query).await.unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].content, "Your user_id is: 456");
    assert_eq!(sent[0].chat_id, 456);
}
