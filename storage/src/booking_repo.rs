//! Booking repository: sessions booked through the bot's inline keyboard.

use crate::models::BookingRecord;
use crate::sqlite_pool::SqlitePoolManager;
use tracing::{debug, info};

#[derive(Clone)]
pub struct BookingRepository {
    pool_manager: SqlitePoolManager,
}

impl BookingRepository {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        Self::with_pool(pool_manager).await
    }

    pub async fn with_pool(pool_manager: SqlitePoolManager) -> Result<Self, sqlx::Error> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating bookings table if not exist");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bookings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                username TEXT,
                booking_time TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;

        Ok(())
    }

    /// Inserts the booking and returns the id assigned by SQLite.
    pub async fn save(&self, booking: &BookingRecord) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO bookings (user_id, username, booking_time, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(booking.user_id)
        .bind(&booking.username)
        .bind(booking.booking_time)
        .bind(booking.created_at)
        .execute(self.pool_manager.pool())
        .await?;

        let id = result.last_insert_rowid();
        debug!(booking_id = id, user_id = booking.user_id, "Saved booking");
        Ok(id)
    }

    /// Newest bookings first.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<BookingRecord>, sqlx::Error> {
        sqlx::query_as::<_, BookingRecord>(
            "SELECT * FROM bookings ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.pool_manager.pool())
        .await
    }

    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<BookingRecord>, sqlx::Error> {
        sqlx::query_as::<_, BookingRecord>(
            "SELECT * FROM bookings WHERE user_id = ? ORDER BY booking_time",
        )
        .bind(user_id)
        .fetch_all(self.pool_manager.pool())
        .await
    }
}
