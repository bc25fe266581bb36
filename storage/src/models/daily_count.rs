use serde::{Deserialize, Serialize};

/// Number of stored messages for one UTC day (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailyCount {
    pub day: String,
    pub message_count: i64,
}
