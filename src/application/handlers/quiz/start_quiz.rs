//! StartQuizHandler - Command handler for beginning (or restarting) a quiz.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::quiz::{QuestionBank, QuestionView, QuizError, SelectionEngine};
use crate::ports::SessionStore;

/// Command to start a quiz for a user.
#[derive(Debug, Clone)]
pub struct StartQuizCommand {
    pub user_id: UserId,
}

/// Result of a successful start.
#[derive(Debug, Clone)]
pub struct StartQuizResult {
    pub first_question: QuestionView,
}

/// Handler for starting quizzes.
///
/// Any session already in progress is overwritten.
pub struct StartQuizHandler {
    store: Arc<dyn SessionStore>,
    bank: Arc<QuestionBank>,
}

impl StartQuizHandler {
    pub fn new(store: Arc<dyn SessionStore>, bank: Arc<QuestionBank>) -> Self {
        Self { store, bank }
    }

    pub async fn handle(&self, cmd: StartQuizCommand) -> Result<StartQuizResult, QuizError> {
        let engine = SelectionEngine::new(&self.bank);
        let session = engine.start();
        let first_question = engine.view(&session)?;

        self.store.start(cmd.user_id, session).await;

        Ok(StartQuizResult { first_question })
    }
}
