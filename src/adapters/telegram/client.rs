//! Telegram Bot API client.
//!
//! Implements the chat transport, update source and webhook registrar ports
//! over plain HTTPS calls to `<base_url>/bot<token>/<method>`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = TelegramConfig::new(token)
//!     .with_base_url("https://api.telegram.org")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let client = TelegramClient::new(config)?;
//! ```
//!
//! The token is part of every request URL, so transport errors are
//! stripped of their URL before they are logged or returned.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use std::time::Duration;

use super::types::{
    AnswerCallbackQueryRequest, ApiResponse, DeleteWebhookRequest, EditMessageReplyMarkupRequest,
    GetUpdatesRequest, InlineKeyboardMarkup, SendMessageRequest, SetWebhookRequest, Update,
    ALLOWED_UPDATES,
};
use crate::domain::quiz::Button;
use crate::ports::{
    ChatTransport, InboundEvent, InboundUpdate, MessageRef, TransportError, UpdateSource,
    WebhookRegistrar,
};

/// Default Bot API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

/// Description the API returns when an edit would change nothing.
const NOT_MODIFIED: &str = "message is not modified";

/// Configuration for the Telegram client.
#[derive(Debug)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather.
    token: SecretString,
    /// Base URL for the API (default: https://api.telegram.org).
    pub base_url: String,
    /// Timeout for ordinary calls; long polls add their own wait on top.
    pub timeout: Duration,
}

impl TelegramConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

/// Bot API client.
pub struct TelegramClient {
    config: TelegramConfig,
    client: Client,
}

impl TelegramClient {
    /// # Errors
    ///
    /// Returns `TransportError::Http` if the HTTP client cannot be built.
    pub fn new(config: TelegramConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.token(),
            method
        )
    }

    fn request<P: Serialize + ?Sized>(&self, method: &str, payload: &P) -> RequestBuilder {
        self.client.post(self.method_url(method)).json(payload)
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        method: &str,
        request: RequestBuilder,
    ) -> Result<R, TransportError> {
        tracing::trace!(method, "Calling Bot API");

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Http(e.without_url().to_string()))?;
        let status = response.status();

        let envelope: ApiResponse<R> = response.json().await.map_err(|e| {
            TransportError::Decode(format!("{} (HTTP {})", e.without_url(), status))
        })?;

        if !envelope.ok {
            return Err(TransportError::Api {
                method: method.to_string(),
                description: envelope
                    .description
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            });
        }

        envelope
            .result
            .ok_or_else(|| TransportError::Decode(format!("{} returned no result", method)))
    }

    async fn call<P: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        method: &str,
        payload: &P,
    ) -> Result<R, TransportError> {
        self.execute(method, self.request(method, payload)).await
    }
}

/// Converts one raw update, keeping its id even when the payload is not
/// understood so the poll offset can still move past it.
fn decode_update(raw: serde_json::Value) -> InboundUpdate {
    let update_id = raw.get("update_id").and_then(serde_json::Value::as_i64);
    match serde_json::from_value::<Update>(raw) {
        Ok(update) => update.into(),
        Err(error) => {
            tracing::warn!(update_id, error = %error, "Skipping undecodable update");
            InboundUpdate {
                update_id: update_id.unwrap_or_default(),
                event: InboundEvent::Ignored,
            }
        }
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        buttons: Option<&[Button]>,
    ) -> Result<(), TransportError> {
        let payload = SendMessageRequest {
            chat_id,
            text,
            reply_markup: buttons.map(InlineKeyboardMarkup::from_buttons),
        };
        self.call::<_, IgnoredAny>("sendMessage", &payload).await?;
        Ok(())
    }

    async fn edit_reply_markup(
        &self,
        message: MessageRef,
        buttons: Option<&[Button]>,
    ) -> Result<(), TransportError> {
        let payload = EditMessageReplyMarkupRequest {
            chat_id: message.chat_id,
            message_id: message.message_id,
            reply_markup: buttons.map(InlineKeyboardMarkup::from_buttons),
        };
        match self
            .call::<_, IgnoredAny>("editMessageReplyMarkup", &payload)
            .await
        {
            Ok(_) => Ok(()),
            Err(TransportError::Api { description, .. }) if description.contains(NOT_MODIFIED) => {
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        notice: Option<&str>,
        show_alert: bool,
    ) -> Result<(), TransportError> {
        let payload = AnswerCallbackQueryRequest {
            callback_query_id: callback_id,
            text: notice,
            show_alert,
        };
        self.call::<_, IgnoredAny>("answerCallbackQuery", &payload)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UpdateSource for TelegramClient {
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<InboundUpdate>, TransportError> {
        let payload = GetUpdatesRequest {
            offset,
            timeout: timeout_secs,
            allowed_updates: ALLOWED_UPDATES,
        };
        let request = self
            .request("getUpdates", &payload)
            .timeout(self.config.timeout + Duration::from_secs(timeout_secs));

        let raw: Vec<serde_json::Value> = self.execute("getUpdates", request).await?;
        Ok(raw.into_iter().map(decode_update).collect())
    }
}

#[async_trait]
impl WebhookRegistrar for TelegramClient {
    async fn set_webhook(
        &self,
        url: &str,
        secret: &str,
        drop_pending_updates: bool,
    ) -> Result<(), TransportError> {
        let payload = SetWebhookRequest {
            url,
            secret_token: secret,
            drop_pending_updates,
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call::<_, IgnoredAny>("setWebhook", &payload).await?;
        Ok(())
    }

    async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<(), TransportError> {
        self.call::<_, IgnoredAny>(
            "deleteWebhook",
            &DeleteWebhookRequest {
                drop_pending_updates,
            },
        )
        .await?;
        Ok(())
    }
}
