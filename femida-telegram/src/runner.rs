//! Dispatcher: converts teloxide messages and callback queries to core types and hands them to the HandlerChain.
//! Each update runs on its own tracked task so a slow handler does not block polling; on shutdown the
//! dispatcher waits for in-flight updates before returning.

use anyhow::Result;
use femida_core::{ToCoreCallback, ToCoreMessage};
use handler_chain::HandlerChain;
use std::future::Future;
use std::time::Duration;
use teloxide::prelude::*;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, instrument, warn};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

/// How long shutdown waits for in-flight updates after Ctrl-C.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Username reported by `get_me`; None when the call failed.
#[derive(Clone, Debug, Default)]
pub struct BotIdentity {
    pub username: Option<String>,
}

/// Update tasks spawned by the dispatcher, drained on shutdown.
#[derive(Clone, Default)]
pub struct UpdateTasks {
    tracker: TaskTracker,
}

impl UpdateTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tracker.spawn(task);
    }

    pub fn len(&self) -> usize {
        self.tracker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracker.is_empty()
    }

    /// Closes the tracker and waits up to `grace` for running tasks.
    /// Returns false when tasks were still running at the deadline.
    pub async fn drain(&self, grace: Duration) -> bool {
        self.tracker.close();
        tokio::time::timeout(grace, self.tracker.wait()).await.is_ok()
    }
}

/// Starts long polling with the given teloxide Bot and HandlerChain. Returns after Ctrl-C once in-flight updates finish.
#[instrument(skip(bot, handler_chain))]
pub async fn run_dispatcher(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    let identity = match bot.get_me().await {
        Ok(me) => {
            info!(
                username = %me.user.username.as_deref().unwrap_or("unknown"),
                "Bot identity confirmed, starting dispatcher"
            );
            BotIdentity {
                username: me.user.username.clone(),
            }
        }
        Err(e) => {
            warn!(error = %e, "get_me failed; the token may be invalid");
            BotIdentity::default()
        }
    };

    let tasks = UpdateTasks::new();

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handler_chain, tasks.clone(), identity])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!(pending = tasks.len(), "Dispatcher stopped, waiting for in-flight updates");
    if !tasks.drain(SHUTDOWN_GRACE).await {
        warn!(pending = tasks.len(), "Shutdown grace elapsed with updates still running");
    }
    Ok(())
}

async fn on_message(
    msg: Message,
    chain: HandlerChain,
    tasks: UpdateTasks,
    identity: BotIdentity,
) -> ResponseResult<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();

    if !core_msg.is_addressed_to(identity.username.as_deref()) {
        debug!(
            chat_id = core_msg.chat.id,
            addressee = ?core_msg.command_addressee(),
            "Skipping command addressed to another bot"
        );
        return Ok(());
    }

    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        message_type = %core_msg.message_type,
        "Received message"
    );

    tasks.spawn(async move {
        if let Err(e) = chain.handle(&core_msg).await {
            error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
        }
    });

    Ok(())
}

async fn on_callback(q: CallbackQuery, chain: HandlerChain, tasks: UpdateTasks) -> ResponseResult<()> {
    let callback = TelegramCallbackWrapper(&q).to_core();

    info!(
        user_id = callback.user.id,
        data = ?callback.data,
        "Received callback query"
    );

    tasks.spawn(async move {
        if let Err(e) = chain.handle_callback(&callback).await {
            error!(error = %e, user_id = callback.user.id, "Callback handling failed");
        }
    });

    Ok(())
}
