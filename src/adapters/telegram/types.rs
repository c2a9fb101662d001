//! Bot API wire types.
//!
//! Only the fields the quiz reads or writes are modelled; serde ignores the
//! rest. Inbound payloads are converted into port-level [`InboundUpdate`]s
//! right here so nothing above the adapter sees Telegram shapes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;
use crate::domain::quiz::Button;
use crate::ports::{BotCommand, CallbackEvent, InboundEvent, InboundUpdate, MessageRef};

/// Envelope wrapping every Bot API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboardMarkup {
    /// One button per row, in the given order.
    pub fn from_buttons(buttons: &[Button]) -> Self {
        Self {
            inline_keyboard: buttons
                .iter()
                .map(|b| {
                    vec![InlineKeyboardButton {
                        text: b.label.clone(),
                        callback_data: b.action.token(),
                    }]
                })
                .collect(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Request payloads
// ════════════════════════════════════════════════════════════════════════════════

/// Update kinds the bot subscribes to.
pub const ALLOWED_UPDATES: [&str; 2] = ["message", "callback_query"];

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// Omitting `reply_markup` removes the keyboard.
#[derive(Debug, Serialize)]
pub struct EditMessageReplyMarkupRequest {
    pub chat_id: i64,
    pub message_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
pub struct AnswerCallbackQueryRequest<'a> {
    pub callback_query_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    pub show_alert: bool,
}

#[derive(Debug, Serialize)]
pub struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: [&'static str; 2],
}

#[derive(Debug, Serialize)]
pub struct SetWebhookRequest<'a> {
    pub url: &'a str,
    pub secret_token: &'a str,
    pub drop_pending_updates: bool,
    pub allowed_updates: [&'static str; 2],
}

#[derive(Debug, Serialize)]
pub struct DeleteWebhookRequest {
    pub drop_pending_updates: bool,
}

// ════════════════════════════════════════════════════════════════════════════════
// Inbound conversion
// ════════════════════════════════════════════════════════════════════════════════

/// Parses `/start`, `/reset` and their `@botname` forms; arguments are ignored.
fn parse_command(text: &str) -> Option<BotCommand> {
    let word = text.split_whitespace().next()?;
    let name = word.strip_prefix('/')?;
    let name = name.split('@').next().unwrap_or(name);
    match name {
        "start" => Some(BotCommand::Start),
        "reset" => Some(BotCommand::Reset),
        _ => None,
    }
}

impl From<Update> for InboundUpdate {
    fn from(update: Update) -> Self {
        let event = if let Some(query) = update.callback_query {
            InboundEvent::Callback(CallbackEvent {
                callback_id: query.id,
                user_id: UserId::new(query.from.id),
                message: query.message.map(|m| MessageRef {
                    chat_id: m.chat.id,
                    message_id: m.message_id,
                }),
                data: query.data,
            })
        } else if let Some(message) = update.message {
            let command = message.text.as_deref().and_then(parse_command);
            match (command, message.from) {
                (Some(command), Some(from)) => InboundEvent::Command {
                    user_id: UserId::new(from.id),
                    chat_id: message.chat.id,
                    command,
                },
                _ => InboundEvent::Ignored,
            }
        } else {
            InboundEvent::Ignored
        };

        InboundUpdate {
            update_id: update.update_id,
            event,
        }
    }
}
