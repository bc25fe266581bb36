use async_trait::async_trait;
use femida_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;

/// Answers `/id` with the chat id, which is also the user id in private chats.
pub struct UserIdHandler {
    bot: Arc<dyn Bot>,
}

impl UserIdHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for UserIdHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_command("id") {
            return Ok(HandlerResponse::Continue);
        }
        let reply = format!("Your user_id is: {}", message.chat.id);
        self.bot.reply_to(message, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
