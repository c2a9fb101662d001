//! Chat transport ports.
//!
//! Inbound events are normalised into [`InboundUpdate`] so the application
//! layer never sees platform payloads. Outbound, the application renders
//! text, button sets and ephemeral notices through [`ChatTransport`].

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::quiz::Button;

/// Errors raised by transport adapters.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("API rejected {method}: {description}")]
    Api { method: String, description: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Slash commands the bot reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Reset,
}

/// A message already delivered to a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i64,
}

/// A button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackEvent {
    /// Id used to acknowledge the press.
    pub callback_id: String,
    pub user_id: UserId,
    /// Message that carried the pressed button, if still accessible.
    pub message: Option<MessageRef>,
    /// Action token of the button.
    pub data: Option<String>,
}

/// What an inbound update asks the bot to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command {
        user_id: UserId,
        chat_id: i64,
        command: BotCommand,
    },
    Callback(CallbackEvent),
    /// Anything the quiz does not react to.
    Ignored,
}

impl InboundEvent {
    /// User the event belongs to, if any.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            InboundEvent::Command { user_id, .. } => Some(*user_id),
            InboundEvent::Callback(cb) => Some(cb.user_id),
            InboundEvent::Ignored => None,
        }
    }
}

/// An inbound event with the transport's monotonically increasing id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundUpdate {
    pub update_id: i64,
    pub event: InboundEvent,
}

/// Outbound side of the chat platform.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends `text` to the chat, optionally with one button per row.
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        buttons: Option<&[Button]>,
    ) -> Result<(), TransportError>;

    /// Replaces the buttons under an existing message; `None` removes them.
    async fn edit_reply_markup(
        &self,
        message: MessageRef,
        buttons: Option<&[Button]>,
    ) -> Result<(), TransportError>;

    /// Acknowledges a button press, optionally with a notice.
    async fn answer_callback(
        &self,
        callback_id: &str,
        notice: Option<&str>,
        show_alert: bool,
    ) -> Result<(), TransportError>;
}

/// Pull side of the chat platform (long polling).
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Fetches updates with id >= `offset`, waiting up to `timeout_secs`.
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<InboundUpdate>, TransportError>;
}

/// Push side of the chat platform (webhooks).
#[async_trait]
pub trait WebhookRegistrar: Send + Sync {
    async fn set_webhook(
        &self,
        url: &str,
        secret: &str,
        drop_pending_updates: bool,
    ) -> Result<(), TransportError>;

    async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<(), TransportError>;
}
