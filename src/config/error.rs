//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid listen address: {0}")]
    InvalidSocketAddr(String),

    #[error("Poll timeout must be between 1 and 50 seconds")]
    InvalidPollTimeout,

    #[error("Webhook URL must start with http:// or https://")]
    InvalidWebhookUrl,

    #[error("Webhook URL must use HTTPS in production")]
    WebhookMustBeHttps,

    #[error("Webhook secret must be 1-256 characters of A-Z, a-z, 0-9, _ or -")]
    InvalidWebhookSecret,
}
