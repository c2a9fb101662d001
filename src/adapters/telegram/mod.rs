//! Telegram Bot API adapter.
//!
//! - [`TelegramClient`] implements the chat transport, update source and
//!   webhook registrar ports over the HTTPS Bot API.
//! - [`LongPoller`] drives the long-poll run mode.
//! - [`types`] holds the wire format and its conversion into port events.

mod client;
mod polling;
pub mod types;

pub use client::{TelegramClient, TelegramConfig, DEFAULT_API_BASE_URL};
pub use polling::{Backoff, LongPoller};
