//! Webhook configuration
//!
//! Setting `url` switches the bot from long polling to webhook mode.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

const MAX_SECRET_LEN: usize = 256;

/// Webhook configuration
#[derive(Debug, Default, Deserialize)]
pub struct WebhookConfig {
    /// Public base URL the platform can reach, e.g. `https://bot.example.com`
    pub url: Option<String>,

    /// Shared secret; used in the path and as the verification header
    pub secret: Option<SecretString>,
}

impl WebhookConfig {
    /// Webhook mode is on when a URL is configured.
    pub fn is_enabled(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.trim().is_empty())
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_ref().map(|s| s.expose_secret().as_str())
    }

    /// Full URL to register: `<url>/webhook/<secret>`.
    pub fn endpoint(&self) -> Option<String> {
        match (self.url.as_deref(), self.secret()) {
            (Some(url), Some(secret)) => Some(format!(
                "{}/webhook/{}",
                url.trim().trim_end_matches('/'),
                secret
            )),
            _ => None,
        }
    }

    /// Validate webhook configuration; a no-op when webhook mode is off.
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        if !self.is_enabled() {
            return Ok(());
        }

        let url = self.url.as_deref().unwrap_or_default().trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidWebhookUrl);
        }
        if environment == Environment::Production && !url.starts_with("https://") {
            return Err(ValidationError::WebhookMustBeHttps);
        }

        let secret = self
            .secret()
            .ok_or(ValidationError::MissingRequired("WEBHOOK__SECRET"))?;
        let valid = !secret.is_empty()
            && secret.len() <= MAX_SECRET_LEN
            && secret
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ValidationError::InvalidWebhookSecret);
        }

        Ok(())
    }
}
