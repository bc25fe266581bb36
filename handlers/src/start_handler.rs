//! `/start`: greets the user and shows the Web App button.

use async_trait::async_trait;
use femida_core::{Bot, Handler, HandlerResponse, Keyboard, Message, Result};
use std::sync::Arc;
use tracing::{info, instrument};

const GREETING: &str = "Hello, please describe your problem";

/// Replies to `/start` with a greeting and a reply keyboard whose button opens the Web App.
pub struct StartHandler {
    bot: Arc<dyn Bot>,
    keyboard: Keyboard,
    greeting: String,
}

impl StartHandler {
    /// `keyboard` is normally `WebAppLink::keyboard(button_text)`.
    pub fn new(bot: Arc<dyn Bot>, keyboard: Keyboard) -> Self {
        Self {
            bot,
            keyboard,
            greeting: GREETING.to_string(),
        }
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }
}

#[async_trait]
impl Handler for StartHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_command("start") {
            return Ok(HandlerResponse::Continue);
        }
        self.bot
            .send_keyboard(&message.chat, &self.greeting, &self.keyboard)
            .await?;
        info!(user_id = message.user.id, "Sent Web App keyboard");
        Ok(HandlerResponse::Reply(self.greeting.clone()))
    }
}
