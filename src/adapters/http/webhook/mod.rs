//! Webhook HTTP adapter.
//!
//! Receives updates pushed by the Bot API and exposes a liveness probe.

mod handlers;
mod routes;

pub use handlers::{handle_update, healthz, WebhookAppState, SECRET_HEADER};
pub use routes::{webhook_path, webhook_router};
