//! Bot API configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::telegram::DEFAULT_API_BASE_URL;

/// Longest wait the Bot API accepts for `getUpdates`.
const MAX_POLL_TIMEOUT_SECS: u64 = 50;

/// Bot API configuration (Telegram)
#[derive(Debug, Deserialize)]
pub struct BotConfig {
    /// Bot token issued by BotFather
    pub token: SecretString,

    /// Bot API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Server-side wait for each long poll, in seconds
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

impl BotConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
            api_base_url: default_api_base_url(),
            poll_timeout_secs: default_poll_timeout(),
        }
    }

    /// Validate bot configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("BOT__TOKEN"));
        }
        if self.poll_timeout_secs == 0 || self.poll_timeout_secs > MAX_POLL_TIMEOUT_SECS {
            return Err(ValidationError::InvalidPollTimeout);
        }
        Ok(())
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_poll_timeout() -> u64 {
    30
}
