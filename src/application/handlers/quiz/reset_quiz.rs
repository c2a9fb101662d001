//! ResetQuizHandler - Command handler for abandoning a quiz.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::ports::SessionStore;

/// Command to drop a user's session.
#[derive(Debug, Clone)]
pub struct ResetQuizCommand {
    pub user_id: UserId,
}

/// Result of a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetQuizResult {
    /// Whether a quiz was in progress.
    pub had_session: bool,
}

/// Handler for resets. Always succeeds.
pub struct ResetQuizHandler {
    store: Arc<dyn SessionStore>,
}

impl ResetQuizHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: ResetQuizCommand) -> ResetQuizResult {
        ResetQuizResult {
            had_session: self.store.clear(cmd.user_id).await,
        }
    }
}
