//! Support form submitted from the Web App via `Telegram.WebApp.sendData`.

use async_trait::async_trait;
use femida_core::{Bot, Handler, HandlerError, HandlerResponse, Message, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

const RESEND_NOTICE: &str =
    "Sorry, the form could not be read. Please open the support form and send it again.";

/// Payload the support Web App sends: `{"name": ..., "email": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl SupportRequest {
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| HandlerError::InvalidWebAppData(e.to_string()).into())
    }

    /// Echo sent back to the user as confirmation.
    pub fn summary(&self) -> String {
        format!(
            "Name: {}. Email: {}. Message: {}",
            self.name, self.email, self.message
        )
    }
}

/// Parses Web App data messages as [`SupportRequest`] and echoes them back.
pub struct SupportFormHandler {
    bot: Arc<dyn Bot>,
}

impl SupportFormHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for SupportFormHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(raw) = message.web_app_data.as_deref() else {
            return Ok(HandlerResponse::Continue);
        };

        let reply = match SupportRequest::parse(raw) {
            Ok(request) => {
                info!(user_id = message.user.id, email = %request.email, "Support request received");
                request.summary()
            }
            Err(e) => {
                warn!(error = %e, user_id = message.user.id, "Unreadable web app data");
                RESEND_NOTICE.to_string()
            }
        };

        self.bot.reply_to(message, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}
