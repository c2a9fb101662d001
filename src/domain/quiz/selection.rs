//! Selection engine - the per-session quiz state machine.
//!
//! ```text
//! NoSession --start--> Active(0) --finalize--> Active(1) ... --finalize--> Completed
//!     ^                    |
//!     +------reset---------+
//! ```
//!
//! Every operation takes the current session by reference and returns a
//! [`Transition`] holding the next value; on error the caller keeps the
//! session it already has, so rejected actions never change state.

use super::action::QuizAction;
use super::bank::{Question, QuestionBank};
use super::errors::QuizError;
use super::ranking::{summarize_for, QuizSummary};
use super::scoring::apply_awards;
use super::session::QuizSession;
use super::view::QuestionView;
use crate::domain::foundation::{OptionId, QuestionId};

/// Result of a successful action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Selection changed; the same question is still current.
    Selecting(QuizSession),
    /// The question was finalized and the next one is current.
    Advanced(QuizSession),
    /// The last question was finalized; the session ends here.
    Completed(QuizSummary),
}

impl Transition {
    /// Session to keep after this transition; `None` once completed.
    pub fn session(&self) -> Option<&QuizSession> {
        match self {
            Transition::Selecting(session) | Transition::Advanced(session) => Some(session),
            Transition::Completed(_) => None,
        }
    }
}

/// Applies user actions to sessions against a fixed bank.
#[derive(Debug, Clone, Copy)]
pub struct SelectionEngine<'a> {
    bank: &'a QuestionBank,
}

impl<'a> SelectionEngine<'a> {
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self { bank }
    }

    /// Fresh session positioned on the first question.
    pub fn start(&self) -> QuizSession {
        QuizSession::start(self.bank)
    }

    /// The question the session is waiting on.
    ///
    /// A session past the last question cannot exist (completion removes
    /// it), so an out-of-range index is reported as no active quiz.
    pub fn current_question(&self, session: &QuizSession) -> Result<&'a Question, QuizError> {
        self.bank
            .question(session.question_index())
            .ok_or(QuizError::NotFound)
    }

    /// Render of the current question with the session's selection.
    pub fn view(&self, session: &QuizSession) -> Result<QuestionView, QuizError> {
        let question = self.current_question(session)?;
        Ok(QuestionView::render(question, session.selection()))
    }

    pub fn apply(&self, session: &QuizSession, action: QuizAction) -> Result<Transition, QuizError> {
        match action {
            QuizAction::Toggle { question, option } => self.toggle(session, question, option),
            QuizAction::Advance { question } => self.advance(session, question),
            QuizAction::Clear { question } => self.clear(session, question),
        }
    }

    /// Toggles `option` on the current question.
    ///
    /// Single-select questions finalize immediately with the pressed option.
    /// On multi-select questions a selected option is removed, an unselected
    /// one is appended unless `max_select` is already reached.
    pub fn toggle(
        &self,
        session: &QuizSession,
        question_id: QuestionId,
        option: OptionId,
    ) -> Result<Transition, QuizError> {
        let question = self.guard(session, question_id)?;

        if question.is_single_select() {
            return self.finalize(session, question, &[option]);
        }

        let mut selection = session.selection().to_vec();
        if let Some(pos) = selection.iter().position(|o| *o == option) {
            selection.remove(pos);
        } else {
            if selection.len() >= question.max_select() {
                return Err(QuizError::SelectionLimitExceeded {
                    max: question.max_select(),
                });
            }
            selection.push(option);
        }

        Ok(Transition::Selecting(session.with_selection(selection)))
    }

    /// Empties the selection of the current question.
    pub fn clear(&self, session: &QuizSession, question_id: QuestionId) -> Result<Transition, QuizError> {
        self.guard(session, question_id)?;
        Ok(Transition::Selecting(session.with_selection(Vec::new())))
    }

    /// Submits the current selection if its size is within bounds.
    pub fn advance(&self, session: &QuizSession, question_id: QuestionId) -> Result<Transition, QuizError> {
        let question = self.guard(session, question_id)?;

        if !question.accepts_count(session.selection().len()) {
            return Err(QuizError::SelectionCountInvalid {
                min: question.min_select(),
                max: question.max_select(),
            });
        }

        self.finalize(session, question, session.selection())
    }

    /// Rejects actions aimed at any question but the current one.
    fn guard(&self, session: &QuizSession, question_id: QuestionId) -> Result<&'a Question, QuizError> {
        let current = self.current_question(session)?;
        if current.id() == question_id {
            return Ok(current);
        }

        match self.bank.position_of(question_id) {
            Some(pos) if pos < session.question_index() => Err(QuizError::already_answered()),
            _ => Err(QuizError::not_reached_yet()),
        }
    }

    fn finalize(
        &self,
        session: &QuizSession,
        question: &Question,
        chosen: &[OptionId],
    ) -> Result<Transition, QuizError> {
        let scored = apply_awards(question, chosen, session).next_question();

        if scored.question_index() < self.bank.len() {
            Ok(Transition::Advanced(scored))
        } else {
            Ok(Transition::Completed(summarize_for(self.bank, scored.scores())?))
        }
    }
}
