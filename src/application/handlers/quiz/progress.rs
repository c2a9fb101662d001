//! QuizProgress - Renderable outcome of an in-quiz action.

use crate::domain::quiz::{QuestionBank, QuestionView, QuizError, QuizSummary, SelectionEngine, Transition};

/// What the user should see after an accepted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizProgress {
    /// Same question, updated selection markers.
    Selecting(QuestionView),
    /// The answer was recorded; carries the next question.
    Advanced(QuestionView),
    /// The last answer was recorded and the session is gone.
    Completed(QuizSummary),
}

impl QuizProgress {
    pub(crate) fn from_transition(
        bank: &QuestionBank,
        transition: Transition,
    ) -> Result<Self, QuizError> {
        let engine = SelectionEngine::new(bank);
        Ok(match transition {
            Transition::Selecting(session) => QuizProgress::Selecting(engine.view(&session)?),
            Transition::Advanced(session) => QuizProgress::Advanced(engine.view(&session)?),
            Transition::Completed(summary) => QuizProgress::Completed(summary),
        })
    }

    /// True once the current question has been answered.
    pub fn is_finalized(&self) -> bool {
        !matches!(self, QuizProgress::Selecting(_))
    }
}
