//! # femida-core
//!
//! Core types and traits for the Femida bot: [`Bot`], [`Handler`], message, callback and user types,
//! reply keyboards, and tracing initialization. Transport-agnostic; used by femida-telegram and handler-chain.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{mask_token, Bot, InlineButton, Keyboard};
pub use error::{FemidaError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    CallbackQuery, Chat, Handler, HandlerResponse, Message, MessageDirection, ToCoreCallback,
    ToCoreMessage, ToCoreUser, User, MESSAGE_TYPE_OTHER, MESSAGE_TYPE_TEXT,
    MESSAGE_TYPE_WEB_APP_DATA,
};
