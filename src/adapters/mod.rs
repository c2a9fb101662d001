//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `storage` - Session storage (in-memory)
//! - `telegram` - Telegram Bot API client and long-poll loop
//! - `http` - Webhook endpoint and health probe

pub mod http;
pub mod storage;
pub mod telegram;

pub use http::{webhook_router, WebhookAppState};
pub use storage::InMemorySessionStore;
pub use telegram::{LongPoller, TelegramClient, TelegramConfig};
