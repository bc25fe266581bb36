//! Handler that logs every message and callback; never stops the chain.

use async_trait::async_trait;
use femida_core::{CallbackQuery, Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

/// Logs each message in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            message_type = %message.message_type,
            message_content = %message.content,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = ?message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }

    async fn handle_callback(&self, callback: &CallbackQuery) -> Result<HandlerResponse> {
        info!(
            user_id = callback.user.id,
            data = ?callback.data,
            "Received callback"
        );
        Ok(HandlerResponse::Continue)
    }
}
