//! ClearSelectionHandler - Command handler for emptying a pending selection.

use std::sync::Arc;

use super::progress::QuizProgress;
use crate::domain::foundation::{QuestionId, UserId};
use crate::domain::quiz::{QuestionBank, QuizError, QuizSession, SelectionEngine};
use crate::ports::SessionStore;

/// Command to clear the selection on a question.
#[derive(Debug, Clone, Copy)]
pub struct ClearSelectionCommand {
    pub user_id: UserId,
    pub question_id: QuestionId,
}

/// Handler for clear presses.
pub struct ClearSelectionHandler {
    store: Arc<dyn SessionStore>,
    bank: Arc<QuestionBank>,
}

impl ClearSelectionHandler {
    pub fn new(store: Arc<dyn SessionStore>, bank: Arc<QuestionBank>) -> Self {
        Self { store, bank }
    }

    pub async fn handle(&self, cmd: ClearSelectionCommand) -> Result<QuizProgress, QuizError> {
        let bank = Arc::clone(&self.bank);
        let transition = self
            .store
            .update(
                cmd.user_id,
                Box::new(move |session: &QuizSession| {
                    SelectionEngine::new(&bank).clear(session, cmd.question_id)
                }),
            )
            .await?;

        QuizProgress::from_transition(&self.bank, transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::application::handlers::quiz::{ToggleOptionCommand, ToggleOptionHandler};
    use crate::domain::foundation::OptionId;
    use crate::domain::quiz::test_support::sample_bank;

    #[tokio::test]
    async fn clear_is_idempotent() {
        let bank = Arc::new(sample_bank());
        let store = Arc::new(InMemorySessionStore::new());
        store.start(UserId::new(1), QuizSession::start(&bank)).await;

        let toggle = ToggleOptionHandler::new(store.clone(), bank.clone());
        for (question, option) in [(1, 1), (2, 1), (2, 2)] {
            toggle
                .handle(ToggleOptionCommand {
                    user_id: UserId::new(1),
                    question_id: QuestionId::new(question),
                    option_id: OptionId::new(option),
                })
                .await
                .unwrap();
        }

        let handler = ClearSelectionHandler::new(store.clone(), bank);
        let cmd = ClearSelectionCommand {
            user_id: UserId::new(1),
            question_id: QuestionId::new(2),
        };

        let first = handler.handle(cmd).await.unwrap();
        let second = handler.handle(cmd).await.unwrap();

        assert_eq!(first, second);
        match second {
            QuizProgress::Selecting(view) => assert!(view.selected().is_empty()),
            other => panic!("expected Selecting, got {:?}", other),
        }
        assert_eq!(store.get(UserId::new(1)).await.unwrap().question_index(), 1);
    }
}
