use std::process::ExitCode;

use motivation_quiz_bot::app;
use motivation_quiz_bot::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Failed to load configuration: {}", error);
            return ExitCode::FAILURE;
        }
    };

    app::init_tracing(&config.server);

    match app::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %error, "Bot stopped");
            ExitCode::FAILURE
        }
    }
}
