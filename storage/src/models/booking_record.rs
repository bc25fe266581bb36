//! Booked session, stored in the `bookings` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookingRecord {
    /// Assigned by SQLite on insert; 0 before saving.
    pub id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub booking_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl BookingRecord {
    pub fn new(user_id: i64, username: Option<String>, booking_time: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            user_id,
            username,
            booking_time,
            created_at: Utc::now(),
        }
    }
}
