//! Long-poll run mode.
//!
//! Repeatedly asks the update source for new updates and hands each batch
//! to the dispatcher. The offset always moves past the last update seen,
//! including ones that could not be decoded, so nothing is fetched twice.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::application::QuizBot;
use crate::ports::UpdateSource;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Exponential retry delay: 1s, 2s, 4s ... capped at 30s.
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            next: INITIAL_BACKOFF,
        }
    }
}

impl Backoff {
    /// Returns the delay to wait now and doubles the following one.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.next;
        self.next = (self.next * 2).min(MAX_BACKOFF);
        delay
    }

    pub fn reset(&mut self) {
        self.next = INITIAL_BACKOFF;
    }
}

/// Polls for updates until `shutdown` resolves.
pub struct LongPoller {
    source: Arc<dyn UpdateSource>,
    bot: Arc<QuizBot>,
    timeout_secs: u64,
}

impl LongPoller {
    pub fn new(source: Arc<dyn UpdateSource>, bot: Arc<QuizBot>, timeout_secs: u64) -> Self {
        Self {
            source,
            bot,
            timeout_secs,
        }
    }

    /// Runs the poll loop. A batch already fetched is fully dispatched
    /// before shutdown is honoured.
    ///
    /// The next `getUpdates` is only issued once the whole batch has been
    /// handled. This keeps one user's updates in order across batches, at
    /// the cost that a slow chat delays the next batch for everyone.
    pub async fn run<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut offset: Option<i64> = None;
        let mut backoff = Backoff::default();

        tracing::info!(timeout_secs = self.timeout_secs, "Long polling started");

        loop {
            let result = tokio::select! {
                _ = &mut shutdown => break,
                result = self.source.get_updates(offset, self.timeout_secs) => result,
            };

            match result {
                Ok(updates) => {
                    backoff.reset();
                    if let Some(last) = updates.iter().map(|u| u.update_id).max() {
                        offset = Some(last + 1);
                    }
                    if !updates.is_empty() {
                        tracing::debug!(count = updates.len(), ?offset, "Received updates");
                        self.bot.dispatch_batch(updates).await;
                    }
                }
                Err(error) => {
                    let delay = backoff.next_delay();
                    tracing::warn!(
                        error = %error,
                        retry_in_secs = delay.as_secs(),
                        "Polling failed"
                    );
                    tokio::select! {
                        _ = &mut shutdown => break,
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }

        tracing::info!("Long polling stopped");
    }
}
