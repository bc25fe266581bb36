//! Query parameters for listing/filtering messages.
//!
//! Used by MessageRepository::get_messages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageQuery {
    pub user_id: Option<i64>,
    pub chat_id: Option<i64>,
    /// `received` or `sent`.
    pub direction: Option<String>,
    pub limit: Option<i64>,
}
