//! Message repository: persistence and queries for messages.
//!
//! Uses SqlitePoolManager and the models (MessageRecord, MessageQuery, MessageStats, DailyCount).
//! External: SQLite via sqlx; callers use save/get_messages/get_stats/count_by_day.

use crate::models::{DailyCount, MessageQuery, MessageRecord, MessageStats};
use crate::sqlite_pool::SqlitePoolManager;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite};
use tracing::{debug, info};

/// Direction value for messages received from users.
pub const DIRECTION_RECEIVED: &str = "received";
/// Direction value for messages sent by the bot.
pub const DIRECTION_SENT: &str = "sent";

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
}

impl MessageRepository {
    /// Opens its own pool for `database_url` and creates the schema.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        Self::with_pool(pool_manager).await
    }

    /// Uses an existing pool (shared with other repositories) and creates the schema.
    pub async fn with_pool(pool_manager: SqlitePoolManager) -> Result<Self, sqlx::Error> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating messages table if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL,
                chat_id INTEGER NOT NULL,
                username TEXT,
                first_name TEXT,
                last_name TEXT,
                message_type TEXT NOT NULL,
                content TEXT NOT NULL,
                direction TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_messages_user_id ON messages(user_id);
            CREATE INDEX IF NOT EXISTS idx_messages_chat_id ON messages(chat_id);
            CREATE INDEX IF NOT EXISTS idx_messages_created_at ON messages(created_at);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn save(&self, message: &MessageRecord) -> Result<(), sqlx::Error> {
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO messages (id, user_id, chat_id, username, first_name, last_name, message_type, content, direction, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.id)
        .bind(message.user_id)
        .bind(message.chat_id)
        .bind(&message.username)
        .bind(&message.first_name)
        .bind(&message.last_name)
        .bind(&message.message_type)
        .bind(&message.content)
        .bind(&message.direction)
        .bind(message.created_at)
        .execute(pool)
        .await?;

        debug!(
            message_id = %message.id,
            direction = %message.direction,
            content_len = message.content.len(),
            "Saved message"
        );
        Ok(())
    }

    pub async fn get_stats(&self) -> Result<MessageStats, sqlx::Error> {
        let pool = self.pool_manager.pool();

        let total_messages: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(pool)
            .await?;

        let sent_messages: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM messages WHERE direction = ?")
                .bind(DIRECTION_SENT)
                .fetch_one(pool)
                .await?;

        let received_messages: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM messages WHERE direction = ?")
                .bind(DIRECTION_RECEIVED)
                .fetch_one(pool)
                .await?;

        let unique_users: (i64,) = sqlx::query_as("SELECT COUNT(DISTINCT user_id) FROM messages")
            .fetch_one(pool)
            .await?;

        let unique_chats: (i64,) = sqlx::query_as("SELECT COUNT(DISTINCT chat_id) FROM messages")
            .fetch_one(pool)
            .await?;

        // MIN/MAX yield a NULL row on an empty table.
        let first_message: (Option<DateTime<Utc>>,) =
            sqlx::query_as("SELECT MIN(created_at) FROM messages")
                .fetch_one(pool)
                .await?;

        let last_message: (Option<DateTime<Utc>>,) =
            sqlx::query_as("SELECT MAX(created_at) FROM messages")
                .fetch_one(pool)
                .await?;

        Ok(MessageStats {
            total_messages: total_messages.0,
            sent_messages: sent_messages.0,
            received_messages: received_messages.0,
            unique_users: unique_users.0,
            unique_chats: unique_chats.0,
            first_message: first_message.0,
            last_message: last_message.0,
        })
    }

    /// Message counts per UTC day, oldest day first.
    pub async fn count_by_day(&self) -> Result<Vec<DailyCount>, sqlx::Error> {
        let pool = self.pool_manager.pool();

        // created_at is stored as RFC 3339 in UTC, so the first 10 chars are the day.
        let counts = sqlx::query_as::<_, DailyCount>(
            r#"
            SELECT substr(created_at, 1, 10) AS day, COUNT(*) AS message_count
            FROM messages
            GROUP BY day
            ORDER BY day
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(counts)
    }

    /// Newest first, filtered by the set fields of `query`.
    pub async fn get_messages(
        &self,
        query: &MessageQuery,
    ) -> Result<Vec<MessageRecord>, sqlx::Error> {
        let pool = self.pool_manager.pool();
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM messages WHERE 1=1");

        if let Some(uid) = query.user_id {
            builder.push(" AND user_id = ").push_bind(uid);
        }

        if let Some(cid) = query.chat_id {
            builder.push(" AND chat_id = ").push_bind(cid);
        }

        if let Some(direction) = &query.direction {
            builder.push(" AND direction = ").push_bind(direction.clone());
        }

        builder.push(" ORDER BY created_at DESC");

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit);
        }

        let messages: Vec<MessageRecord> = builder
            .build_query_as::<MessageRecord>()
            .fetch_all(pool)
            .await?;
        debug!(count = messages.len(), "Retrieved messages");

        Ok(messages)
    }

    pub async fn get_message_by_id(
        &self,
        message_id: &str,
    ) -> Result<Option<MessageRecord>, sqlx::Error> {
        let pool = self.pool_manager.pool();

        let message = sqlx::query_as::<_, MessageRecord>("SELECT * FROM messages WHERE id = ?")
            .bind(message_id)
            .fetch_optional(pool)
            .await?;

        Ok(message)
    }
}
