//! HTTP adapters - Inbound HTTP surface.
//!
//! Only the webhook run mode serves HTTP.

pub mod webhook;

pub use webhook::{webhook_path, webhook_router, WebhookAppState};
