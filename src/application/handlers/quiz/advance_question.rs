//! AdvanceQuestionHandler - Command handler for submitting a multi-select answer.

use std::sync::Arc;

use super::progress::QuizProgress;
use crate::domain::foundation::{QuestionId, UserId};
use crate::domain::quiz::{QuestionBank, QuizError, QuizSession, SelectionEngine};
use crate::ports::SessionStore;

/// Command to submit the pending selection of a question.
#[derive(Debug, Clone, Copy)]
pub struct AdvanceQuestionCommand {
    pub user_id: UserId,
    pub question_id: QuestionId,
}

/// Handler for next presses.
pub struct AdvanceQuestionHandler {
    store: Arc<dyn SessionStore>,
    bank: Arc<QuestionBank>,
}

impl AdvanceQuestionHandler {
    pub fn new(store: Arc<dyn SessionStore>, bank: Arc<QuestionBank>) -> Self {
        Self { store, bank }
    }

    pub async fn handle(&self, cmd: AdvanceQuestionCommand) -> Result<QuizProgress, QuizError> {
        let bank = Arc::clone(&self.bank);
        let transition = self
            .store
            .update(
                cmd.user_id,
                Box::new(move |session: &QuizSession| {
                    SelectionEngine::new(&bank).advance(session, cmd.question_id)
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
    use crate::domain::quiz::test_support::{code, sample_bank};

    struct Fixture {
        store: Arc<InMemorySessionStore>,
        toggle: ToggleOptionHandler,
        advance: AdvanceQuestionHandler,
    }

    impl Fixture {
        async fn new() -> Self {
            let bank = Arc::new(sample_bank());
            let store = Arc::new(InMemorySessionStore::new());
            store.start(UserId::new(1), QuizSession::start(&bank)).await;
            Self {
                toggle: ToggleOptionHandler::new(store.clone(), bank.clone()),
                advance: AdvanceQuestionHandler::new(store.clone(), bank),
                store,
            }
        }

        async fn press(&self, question: u32, option: u32) -> QuizProgress {
            self.toggle
                .handle(ToggleOptionCommand {
                    user_id: UserId::new(1),
                    question_id: QuestionId::new(question),
                    option_id: OptionId::new(option),
                })
                .await
                .unwrap()
        }

        async fn next(&self, question: u32) -> Result<QuizProgress, QuizError> {
            self.advance
                .handle(AdvanceQuestionCommand {
                    user_id: UserId::new(1),
                    question_id: QuestionId::new(question),
                })
                .await
        }
    }

    #[tokio::test]
    async fn advance_with_too_few_choices_changes_nothing() {
        let fx = Fixture::new().await;
        fx.press(1, 1).await;
        fx.press(2, 1).await;
        fx.press(2, 2).await;
        fx.next(2).await.unwrap();
        fx.press(3, 1).await;
        let before = fx.store.get(UserId::new(1)).await.unwrap();

        let err = fx.next(3).await.unwrap_err();

        assert_eq!(err, QuizError::SelectionCountInvalid { min: 2, max: 3 });
        assert_eq!(fx.store.get(UserId::new(1)).await.unwrap(), before);
    }

    #[tokio::test]
    async fn advance_scores_selection_and_moves_on() {
        let fx = Fixture::new().await;
        fx.press(1, 3).await;
        fx.press(2, 4).await;
        fx.press(2, 3).await;

        let progress = fx.next(2).await.unwrap();

        assert!(progress.is_finalized());
        let session = fx.store.get(UserId::new(1)).await.unwrap();
        assert_eq!(session.question_index(), 2);
        assert_eq!(session.score_of(&code("LU")), 3);
        assert_eq!(session.score_of(&code("HO")), 1);
        assert!(session.selection().is_empty());
    }

    #[tokio::test]
    async fn finishing_the_quiz_ends_the_session() {
        let fx = Fixture::new().await;
        fx.press(1, 1).await;
        fx.press(2, 1).await;
        fx.next(2).await.unwrap();
        fx.press(3, 1).await;
        fx.press(3, 3).await;
        fx.next(3).await.unwrap();

        let last = fx.press(4, 1).await;

        match last {
            QuizProgress::Completed(summary) => {
                assert_eq!(summary.leaders(), vec![&code("IN"), &code("PA")]);
            }
            other => panic!("expected Completed, got {:?}", other),
        }
        assert_eq!(fx.store.get(UserId::new(1)).await, Err(QuizError::NotFound));
    }
}
