//! Session booking through inline keyboards.
//!
//! Flow: `/book` shows a "Book a session" button → pressing it lists [`SLOT_COUNT`] slots one day apart →
//! pressing a slot stores a [`BookingRecord`], notifies the operator chat (if configured) and confirms to the user.
//! Slot buttons carry `confirm_booking_<unix seconds>` so no server-side state is kept between presses.

use async_trait::async_trait;
use chrono::{DateTime, Duration, DurationRound, Utc};
use femida_core::{
    Bot, CallbackQuery, Chat, FemidaError, Handler, HandlerError, HandlerResponse, InlineButton,
    Keyboard, Message, Result,
};
use std::sync::Arc;
use storage::{BookingRecord, BookingRepository};
use tracing::{error, info, instrument, warn};

/// Callback data of the button that opens the slot list.
pub const BOOK_SESSION_DATA: &str = "book_session";
/// Prefix of slot callback data; followed by the slot's unix timestamp in seconds.
pub const CONFIRM_BOOKING_PREFIX: &str = "confirm_booking_";
/// Number of slots offered, starting today.
pub const SLOT_COUNT: i64 = 5;

const SLOT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Slots at `now` (truncated to the minute) plus 0..SLOT_COUNT days.
pub fn booking_slots(now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let start = now.duration_trunc(Duration::minutes(1)).unwrap_or(now);
    (0..SLOT_COUNT).map(|i| start + Duration::days(i)).collect()
}

/// One button per slot, labelled `YYYY-MM-DD HH:MM`.
pub fn slot_keyboard(slots: &[DateTime<Utc>]) -> Keyboard {
    Keyboard::inline_column(
        slots
            .iter()
            .map(|slot| {
                InlineButton::new(
                    slot.format(SLOT_FORMAT).to_string(),
                    format!("{}{}", CONFIRM_BOOKING_PREFIX, slot.timestamp()),
                )
            })
            .collect(),
    )
}

/// Extracts the slot time from `confirm_booking_<ts>`. Returns None when the prefix is absent.
pub fn parse_confirm_data(data: &str) -> Option<Result<DateTime<Utc>>> {
    let raw = data.strip_prefix(CONFIRM_BOOKING_PREFIX)?;
    let parsed = raw
        .parse::<i64>()
        .ok()
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
        .ok_or_else(|| HandlerError::InvalidCallback(data.to_string()).into());
    Some(parsed)
}

fn format_slot(slot: &DateTime<Utc>) -> String {
    slot.format(SLOT_FORMAT).to_string()
}

/// Handles `/book` and the booking callbacks.
pub struct BookingHandler {
    bot: Arc<dyn Bot>,
    repo: BookingRepository,
    operator_chat_id: Option<i64>,
}

impl BookingHandler {
    pub fn new(bot: Arc<dyn Bot>, repo: BookingRepository, operator_chat_id: Option<i64>) -> Self {
        Self {
            bot,
            repo,
            operator_chat_id,
        }
    }

    async fn offer_slots(&self, callback: &CallbackQuery, chat: &Chat) -> Result<HandlerResponse> {
        let keyboard = slot_keyboard(&booking_slots(Utc::now()));
        self.bot
            .send_keyboard(chat, "Choose a date and time for your session:", &keyboard)
            .await?;
        self.bot.answer_callback(&callback.id, None).await?;
        Ok(HandlerResponse::Stop)
    }

    #[instrument(skip(self, callback, chat))]
    async fn confirm(
        &self,
        callback: &CallbackQuery,
        chat: &Chat,
        slot: DateTime<Utc>,
    ) -> Result<HandlerResponse> {
        let user = &callback.user;
        let booking = BookingRecord::new(user.id, user.username.clone(), slot);
        let booking_id = self.repo.save(&booking).await.map_err(|e| {
            error!(error = %e, user_id = user.id, "Failed to save booking");
            FemidaError::Database(e.to_string())
        })?;
        let when = format_slot(&slot);
        info!(booking_id, user_id = user.id, slot = %when, "Booking stored");

        if let Some(operator_chat_id) = self.operator_chat_id {
            let operator = Chat {
                id: operator_chat_id,
                chat_type: "private".to_string(),
            };
            let notice = format!(
                "New booking from user {} (ID: {}) for {}.",
                user.display_name(),
                user.id,
                when
            );
            // The booking is already stored; a failed notification must not hide that from the user.
            if let Err(e) = self.bot.send_message(&operator, &notice).await {
                error!(error = %e, operator_chat_id, "Failed to notify operator");
            }
        }

        self.bot
            .answer_callback(&callback.id, Some("Your booking is confirmed!"))
            .await?;
        let reply = format!("Your session is booked for {}.", when);
        self.bot.send_message(chat, &reply).await?;
        Ok(HandlerResponse::Reply(reply))
    }
}

#[async_trait]
impl Handler for BookingHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_command("book") {
            return Ok(HandlerResponse::Continue);
        }
        let text = "Hi! Click the button below to book a session.";
        let keyboard = Keyboard::Inline(vec![vec![InlineButton::new(
            "Book a session",
            BOOK_SESSION_DATA,
        )]]);
        self.bot.send_keyboard(&message.chat, text, &keyboard).await?;
        Ok(HandlerResponse::Reply(text.to_string()))
    }

    async fn handle_callback(&self, callback: &CallbackQuery) -> Result<HandlerResponse> {
        let Some(data) = callback.data.as_deref() else {
            return Ok(HandlerResponse::Ignore);
        };
        let is_booking = data == BOOK_SESSION_DATA || data.starts_with(CONFIRM_BOOKING_PREFIX);
        if !is_booking {
            return Ok(HandlerResponse::Ignore);
        }

        // Buttons on messages Telegram no longer exposes have no chat to answer in.
        let Some(chat) = callback.chat.clone() else {
            warn!(user_id = callback.user.id, "Booking callback without accessible message");
            self.bot
                .answer_callback(&callback.id, Some("This button has expired."))
                .await?;
            return Ok(HandlerResponse::Stop);
        };

        if data == BOOK_SESSION_DATA {
            return self.offer_slots(callback, &chat).await;
        }

        match parse_confirm_data(data) {
            Some(Ok(slot)) => self.confirm(callback, &chat, slot).await,
            _ => {
                warn!(user_id = callback.user.id, data = %data, "Malformed booking callback");
                self.bot
                    .answer_callback(&callback.id, Some("Sorry, this slot is not valid."))
                    .await?;
                Ok(HandlerResponse::Stop)
            }
        }
    }
}
