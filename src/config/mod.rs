//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `QUIZ_BOT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use motivation_quiz_bot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Run mode: {:?}", config.run_mode());
//! ```

mod bot;
mod error;
mod quiz;
mod server;
mod webhook;

pub use bot::BotConfig;
pub use error::{ConfigError, ValidationError};
pub use quiz::QuizConfig;
pub use server::{Environment, ServerConfig};
pub use webhook::WebhookConfig;

use serde::Deserialize;

/// How updates reach the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Pull updates with `getUpdates`.
    Polling,
    /// Serve HTTP and let the platform push updates.
    Webhook,
}

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server configuration (listen address, environment, log filter)
    #[serde(default)]
    pub server: ServerConfig,

    /// Bot API configuration (token required)
    pub bot: BotConfig,

    /// Webhook configuration; absent means long polling
    #[serde(default)]
    pub webhook: WebhookConfig,

    /// Question bank location
    #[serde(default)]
    pub quiz: QuizConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `QUIZ_BOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `QUIZ_BOT__BOT__TOKEN=123:abc` -> `bot.token = 123:abc`
    /// - `QUIZ_BOT__SERVER__PORT=8080` -> `server.port = 8080`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("QUIZ_BOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.bot.validate()?;
        self.webhook.validate(self.server.environment)?;
        Ok(())
    }

    pub fn run_mode(&self) -> RunMode {
        if self.webhook.is_enabled() {
            RunMode::Webhook
        } else {
            RunMode::Polling
        }
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
