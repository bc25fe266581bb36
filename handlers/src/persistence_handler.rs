//! Handler that persists incoming messages in before() and the bot's reply in after().

use async_trait::async_trait;
use femida_core::{FemidaError, Handler, HandlerResponse, Message, MessageDirection, Result};
use storage::{MessageRecord, MessageRepository, DIRECTION_RECEIVED, DIRECTION_SENT};
use tracing::{debug, error, instrument};

/// Saves each message to the given [`MessageRepository`]; replies (`HandlerResponse::Reply`) are saved as sent.
#[derive(Clone)]
pub struct PersistenceHandler {
    repo: MessageRepository,
}

impl PersistenceHandler {
    /// Creates a handler that persists messages with the given repository.
    pub fn new(repo: MessageRepository) -> Self {
        Self { repo }
    }

    async fn save(&self, record: MessageRecord) -> Result<()> {
        self.repo.save(&record).await.map_err(|e| {
            error!(error = %e, user_id = record.user_id, "Failed to save message");
            FemidaError::Database(e.to_string())
        })
    }
}

fn direction(message: &Message) -> &'static str {
    match message.direction {
        MessageDirection::Incoming => DIRECTION_RECEIVED,
        MessageDirection::Outgoing => DIRECTION_SENT,
    }
}

#[async_trait]
impl Handler for PersistenceHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        // Web App submissions are stored with their raw payload rather than the button text.
        let content = message
            .web_app_data
            .clone()
            .unwrap_or_else(|| message.content.clone());

        let record = MessageRecord::new(
            message.user.id,
            message.chat.id,
            message.message_type.clone(),
            content,
            direction(message),
        )
        .with_names(
            message.user.username.clone(),
            message.user.first_name.clone(),
            message.user.last_name.clone(),
        );

        self.save(record).await?;
        debug!(user_id = message.user.id, message_id = %message.id, "step: incoming message saved");
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        if let HandlerResponse::Reply(text) = response {
            let record = MessageRecord::new(
                message.user.id,
                message.chat.id,
                femida_core::MESSAGE_TYPE_TEXT,
                text.clone(),
                DIRECTION_SENT,
            );
            self.save(record).await?;
            debug!(user_id = message.user.id, "step: reply saved");
        }
        Ok(())
    }
}
