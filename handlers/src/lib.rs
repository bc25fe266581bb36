//! # Handlers for the Femida bot
//!
//! Handler implementations run by the handler chain: logging, persistence, the `/start`
//! Web App greeting, the Web App support form, `/id`, session booking, and the plain-text journal.

mod booking_handler;
mod journal;
mod logging_handler;
mod persistence_handler;
mod start_handler;
mod support_form_handler;
mod user_id_handler;

#[cfg(test)]
mod test;

pub use booking_handler::{
    booking_slots, parse_confirm_data, slot_keyboard, BookingHandler, BOOK_SESSION_DATA,
    CONFIRM_BOOKING_PREFIX, SLOT_COUNT,
};
pub use journal::{JournalHandler, MessageJournal};
pub use logging_handler::LoggingHandler;
pub use persistence_handler::PersistenceHandler;
pub use start_handler::StartHandler;
pub use support_form_handler::{SupportFormHandler, SupportRequest};
pub use user_id_handler::UserIdHandler;
