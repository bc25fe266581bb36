//! # Handler chain
//!
//! Runs a sequence of handlers. For messages each handler has optional before/handle/after: all before
//! run in order (any false stops the chain); then handle runs until Stop or Reply; then all after run in
//! reverse. Callback queries go through `handle_callback` until the first handler claims them.

use femida_core::{CallbackQuery, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Chain of handlers: before (all) → handle (until Stop/Reply) → after (reverse).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handler names in execution order.
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Runs all before → handle until Stop/Reply → all after in reverse.
    #[instrument(skip(self, message))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let mut final_response = HandlerResponse::Continue;

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            "step: handler_chain started"
        );

        for h in &self.handlers {
            let name = h.name();
            debug!(user_id = message.user.id, handler = %name, "step: handler before");
            let should_continue = h.before(message).await?;
            if !should_continue {
                info!(user_id = message.user.id, handler = %name, "step: before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
        }

        for h in &self.handlers {
            let name = h.name();
            let response = h.handle(message).await?;
            let (response_type, reply_len) = match &response {
                HandlerResponse::Continue => ("Continue", None),
                HandlerResponse::Stop => ("Stop", None),
                HandlerResponse::Ignore => ("Ignore", None),
                HandlerResponse::Reply(s) => ("Reply", Some(s.len())),
            };
            debug!(
                user_id = message.user.id,
                handler = %name,
                response_type = %response_type,
                reply_len = ?reply_len,
                "step: handler handle done"
            );

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(user_id = message.user.id, handler = %name, "step: handler chain stopped by handler");
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => {}
            }
        }

        for h in self.handlers.iter().rev() {
            let name = h.name();
            debug!(user_id = message.user.id, handler = %name, "step: handler after");
            h.after(message, &final_response).await?;
        }

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            "step: handler_chain finished"
        );

        Ok(final_response)
    }

    /// Offers the callback to each handler in order; the first Stop or Reply ends the walk.
    /// Returns Ignore when no handler claimed it.
    #[instrument(skip(self, callback))]
    pub async fn handle_callback(&self, callback: &CallbackQuery) -> Result<HandlerResponse> {
        info!(
            user_id = callback.user.id,
            data = ?callback.data,
            "step: callback chain started"
        );

        for h in &self.handlers {
            let name = h.name();
            let response = h.handle_callback(callback).await?;
            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(user_id = callback.user.id, handler = %name, "step: callback handled");
                    return Ok(response);
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => {}
            }
        }

        debug!(user_id = callback.user.id, "step: callback not claimed by any handler");
        Ok(HandlerResponse::Ignore)
    }
}

// Unit/integration tests live in tests/handler_chain_test.rs
