//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `SessionStore` - Per-user quiz session state
//!
//! ## Transport Ports
//!
//! - `ChatTransport` - Outbound messages, button sets and notices
//! - `UpdateSource` - Long-poll retrieval of inbound updates
//! - `WebhookRegistrar` - Webhook registration for push delivery

mod chat_transport;
mod session_store;

pub use chat_transport::{
    BotCommand, CallbackEvent, ChatTransport, InboundEvent, InboundUpdate, MessageRef,
    TransportError, UpdateSource, WebhookRegistrar,
};
pub use session_store::{SessionStep, SessionStore};
