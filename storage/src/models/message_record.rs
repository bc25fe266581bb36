//! Message record model for persistence.
//!
//! Maps to the `messages` table and is used by MessageRepository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRecord {
    pub id: String,
    pub user_id: i64,
    pub chat_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub message_type: String,
    pub content: String,
    pub direction: String,
    pub created_at: DateTime<Utc>,
}

impl MessageRecord {
    /// Creates a new record with a generated UUID and current timestamp. Names are unset.
    pub fn new(
        user_id: i64,
        chat_id: i64,
        message_type: impl Into<String>,
        content: impl Into<String>,
        direction: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            chat_id,
            username: None,
            first_name: None,
            last_name: None,
            message_type: message_type.into(),
            content: content.into(),
            direction: direction.into(),
            created_at: Utc::now(),
        }
    }

    pub fn with_names(
        mut self,
        username: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Self {
        self.username = username;
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}
