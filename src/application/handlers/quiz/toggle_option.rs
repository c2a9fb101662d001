//! ToggleOptionHandler - Command handler for option presses.
//!
//! On single-select questions the press is the answer; on multi-select
//! questions it flips the option in the pending selection.

use std::sync::Arc;

use super::progress::QuizProgress;
use crate::domain::foundation::{OptionId, QuestionId, UserId};
use crate::domain::quiz::{QuestionBank, QuizError, QuizSession, SelectionEngine};
use crate::ports::SessionStore;

/// Command to toggle an option on a question.
#[derive(Debug, Clone, Copy)]
pub struct ToggleOptionCommand {
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub option_id: OptionId,
}

/// Handler for option presses.
pub struct ToggleOptionHandler {
    store: Arc<dyn SessionStore>,
    bank: Arc<QuestionBank>,
}

impl ToggleOptionHandler {
    pub fn new(store: Arc<dyn SessionStore>, bank: Arc<QuestionBank>) -> Self {
        Self { store, bank }
    }

    pub async fn handle(&self, cmd: ToggleOptionCommand) -> Result<QuizProgress, QuizError> {
        let bank = Arc::clone(&self.bank);
        let transition = self
            .store
            .update(
                cmd.user_id,
                Box::new(move |session: &QuizSession| {
                    SelectionEngine::new(&bank).toggle(session, cmd.question_id, cmd.option_id)
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
    use crate::domain::quiz::test_support::{code, sample_bank};
    use crate::domain::quiz::Staleness;

    fn cmd(question: u32, option: u32) -> ToggleOptionCommand {
        ToggleOptionCommand {
            user_id: UserId::new(1),
            question_id: QuestionId::new(question),
            option_id: OptionId::new(option),
        }
    }

    async fn started() -> (Arc<InMemorySessionStore>, ToggleOptionHandler) {
        let bank = Arc::new(sample_bank());
        let store = Arc::new(InMemorySessionStore::new());
        store.start(UserId::new(1), QuizSession::start(&bank)).await;
        let handler = ToggleOptionHandler::new(store.clone(), bank);
        (store, handler)
    }

    #[tokio::test]
    async fn single_select_press_scores_and_advances() {
        let (store, handler) = started().await;

        let progress = handler.handle(cmd(1, 2)).await.unwrap();

        match progress {
            QuizProgress::Advanced(view) => assert_eq!(view.question_id, QuestionId::new(2)),
            other => panic!("expected Advanced, got {:?}", other),
        }
        let session = store.get(UserId::new(1)).await.unwrap();
        assert_eq!(session.score_of(&code("PR")), 1);
        assert_eq!(session.score_of(&code("PA")), 1);
    }

    #[tokio::test]
    async fn multi_select_press_marks_option() {
        let (_store, handler) = started().await;
        handler.handle(cmd(1, 1)).await.unwrap();

        let progress = handler.handle(cmd(2, 3)).await.unwrap();

        match progress {
            QuizProgress::Selecting(view) => assert_eq!(view.selected(), vec![OptionId::new(3)]),
            other => panic!("expected Selecting, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn press_on_answered_question_is_stale() {
        let (store, handler) = started().await;
        handler.handle(cmd(1, 1)).await.unwrap();
        let before = store.get(UserId::new(1)).await.unwrap();

        let err = handler.handle(cmd(1, 3)).await.unwrap_err();

        assert_eq!(err, QuizError::StaleAction(Staleness::AlreadyAnswered));
        assert_eq!(store.get(UserId::new(1)).await.unwrap(), before);
    }

    #[tokio::test]
    async fn press_without_session_is_not_found() {
        let handler =
            ToggleOptionHandler::new(Arc::new(InMemorySessionStore::new()), Arc::new(sample_bank()));
        assert_eq!(handler.handle(cmd(1, 1)).await.unwrap_err(), QuizError::NotFound);
    }
}
