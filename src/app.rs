//! Process wiring: logging, question bank, adapters and the chosen run mode.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::adapters::http::{webhook_router, WebhookAppState};
use crate::adapters::storage::InMemorySessionStore;
use crate::adapters::telegram::{LongPoller, TelegramClient, TelegramConfig};
use crate::application::QuizBot;
use crate::config::{AppConfig, ConfigError, RunMode, ServerConfig, ValidationError};
use crate::domain::quiz::{BankError, QuestionBank};
use crate::ports::{SessionStore, TransportError, WebhookRegistrar};

/// Errors that stop the bot.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to load question bank: {0}")]
    Bank(#[from] BankError),

    #[error("Bot API error: {0}")]
    Transport(#[from] TransportError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured filter. Production logs are JSON.
pub fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Validates the configuration, loads the bank and runs until shutdown.
///
/// # Errors
///
/// Fails fast on invalid configuration or a malformed bank, before any
/// network call is made.
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    config.validate()?;

    let bank = Arc::new(QuestionBank::load(&config.quiz.bank_path)?);
    tracing::info!(
        path = %config.quiz.bank_path.display(),
        questions = bank.len(),
        categories = bank.categories().len(),
        "Question bank loaded"
    );

    let client = Arc::new(TelegramClient::new(
        TelegramConfig::new(config.bot.token.expose_secret().clone())
            .with_base_url(config.bot.api_base_url.clone()),
    )?);
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let bot = Arc::new(QuizBot::new(store, bank, client.clone()));

    match config.run_mode() {
        RunMode::Polling => run_polling(&config, client, bot).await,
        RunMode::Webhook => run_webhook(&config, client, bot).await,
    }
}

async fn run_polling(
    config: &AppConfig,
    client: Arc<TelegramClient>,
    bot: Arc<QuizBot>,
) -> Result<(), AppError> {
    // getUpdates is refused while a webhook is registered.
    client.delete_webhook(false).await?;

    LongPoller::new(client, bot, config.bot.poll_timeout_secs)
        .run(shutdown_signal())
        .await;
    Ok(())
}

async fn run_webhook(
    config: &AppConfig,
    client: Arc<TelegramClient>,
    bot: Arc<QuizBot>,
) -> Result<(), AppError> {
    let secret = config
        .webhook
        .secret()
        .ok_or(ValidationError::MissingRequired("WEBHOOK__SECRET"))?;
    let endpoint = config
        .webhook
        .endpoint()
        .ok_or(ValidationError::MissingRequired("WEBHOOK__URL"))?;
    let addr = config.server.socket_addr()?;

    let router = webhook_router(WebhookAppState::new(
        bot,
        SecretString::new(secret.to_string()),
    ));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    client.set_webhook(&endpoint, secret, true).await?;
    tracing::info!(%addr, "Webhook registered, serving updates");

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Err(error) = client.delete_webhook(true).await {
        tracing::warn!(error = %error, "Failed to delete webhook on shutdown");
    }
    tracing::info!("Webhook server stopped");

    served?;
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %error, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(error = %error, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown requested");
}
