//! HTTP handlers for the webhook run mode.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::adapters::telegram::types::Update;
use crate::application::QuizBot;

/// Header carrying the secret registered with `setWebhook`.
pub const SECRET_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Shared state for webhook handlers.
#[derive(Clone)]
pub struct WebhookAppState {
    bot: Arc<QuizBot>,
    secret: Arc<SecretString>,
}

impl WebhookAppState {
    pub fn new(bot: Arc<QuizBot>, secret: SecretString) -> Self {
        Self {
            bot,
            secret: Arc::new(secret),
        }
    }

    pub(crate) fn secret(&self) -> &str {
        self.secret.expose_secret()
    }

    /// Constant-time comparison against the configured secret.
    fn accepts(&self, provided: &[u8]) -> bool {
        provided.ct_eq(self.secret().as_bytes()).into()
    }
}

/// Receives one update pushed by the Bot API.
///
/// Responds 401 when the secret header is missing or wrong. Any
/// authenticated request gets 200, even with an unreadable body, so the
/// platform does not keep redelivering it.
pub async fn handle_update(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let provided = headers
        .get(SECRET_HEADER)
        .map(|v| v.as_bytes())
        .unwrap_or_default();

    if !state.accepts(provided) {
        tracing::warn!("Rejected webhook call with invalid secret");
        return (StatusCode::UNAUTHORIZED, "unauthorized").into_response();
    }

    match serde_json::from_slice::<Update>(&body) {
        Ok(update) => state.bot.dispatch(update.into()).await,
        Err(error) => tracing::warn!(error = %error, "Ignoring malformed webhook payload"),
    }

    StatusCode::OK.into_response()
}

/// Liveness probe.
pub async fn healthz() -> &'static str {
    "ok"
}
