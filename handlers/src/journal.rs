//! Plain-text journal: one line per received text message, appended to a file.

use async_trait::async_trait;
use femida_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

const ACKNOWLEDGEMENT: &str = "I received your message. It has been saved.";

/// Appends lines to a file. Writes are serialized so concurrent messages never interleave.
pub struct MessageJournal {
    path: PathBuf,
    lock: Mutex<()>,
}

impl MessageJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `text` as a single line; embedded newlines become spaces.
    pub async fn append(&self, text: &str) -> Result<()> {
        let line = format!("{}\n", text.replace(['\r', '\n'], " "));
        let _guard = self.lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

/// Journals every non-command text message and acknowledges it. Placed last in the chain as the fallback.
pub struct JournalHandler {
    bot: Arc<dyn Bot>,
    journal: Arc<MessageJournal>,
}

impl JournalHandler {
    pub fn new(bot: Arc<dyn Bot>, journal: Arc<MessageJournal>) -> Self {
        Self { bot, journal }
    }
}

#[async_trait]
impl Handler for JournalHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_text() || message.command().is_some() || message.content.trim().is_empty() {
            return Ok(HandlerResponse::Ignore);
        }

        self.journal.append(&message.content).await?;
        debug!(
            user_id = message.user.id,
            path = %self.journal.path().display(),
            "Message appended to journal"
        );

        self.bot.reply_to(message, ACKNOWLEDGEMENT).await?;
        Ok(HandlerResponse::Reply(ACKNOWLEDGEMENT.to_string()))
    }
}
