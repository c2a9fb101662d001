//! Quiz module - catalog, sessions and the engines that drive them.
//!
//! # Components
//!
//! - `bank` - immutable question catalog loaded at startup
//! - `session` - per-user quiz state value
//! - `selection` - state machine applying user actions
//! - `scoring` - award accumulation on finalization
//! - `ranking` - final ranking, tie detection and summary text
//! - `view` / `action` - question rendering and action tokens

mod action;
mod bank;
mod errors;
mod ranking;
mod scoring;
mod selection;
mod session;
mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use action::QuizAction;
pub use bank::{
    AnswerOption, Award, Category, Question, QuestionBank, ScoringConfig, DEFAULT_TIE_THRESHOLD,
};
pub use errors::{BankError, QuizError, Staleness};
pub use ranking::{summarize, summarize_for, Leadership, QuizSummary, RankedCategory};
pub use scoring::apply_awards;
pub use selection::{SelectionEngine, Transition};
pub use session::{QuizSession, Scores};
pub use view::{Button, Control, OptionView, QuestionView};
