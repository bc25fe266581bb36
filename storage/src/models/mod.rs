mod booking_record;
mod daily_count;
mod message_query;
mod message_record;
mod message_stats;

pub use booking_record::BookingRecord;
pub use daily_count::DailyCount;
pub use message_query::MessageQuery;
pub use message_record::MessageRecord;
pub use message_stats::MessageStats;
