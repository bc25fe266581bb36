//! Storage crate: message and booking persistence on SQLite.
//!
//! ## Modules
//!
//! - [`models`] – MessageRecord, MessageQuery, MessageStats, DailyCount, BookingRecord
//! - [`message_repo`] – MessageRepository
//! - [`booking_repo`] – BookingRepository
//! - [`sqlite_pool`] – SqlitePoolManager, shared by both repositories

mod booking_repo;
mod message_repo;
mod models;
mod sqlite_pool;

pub use booking_repo::BookingRepository;
pub use message_repo::{MessageRepository, DIRECTION_RECEIVED, DIRECTION_SENT};
pub use models::{BookingRecord, DailyCount, MessageQuery, MessageRecord, MessageStats};
pub use sqlite_pool::SqlitePoolManager;
