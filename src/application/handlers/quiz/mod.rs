//! Quiz command handlers.
//!
//! One handler per user action. Each handler owns clones of the session
//! store and question bank; in-quiz actions go through the store's atomic
//! `update`, so a rejected action never leaves a trace.

mod advance_question;
mod clear_selection;
mod progress;
mod reset_quiz;
mod start_quiz;
mod toggle_option;

pub use advance_question::{AdvanceQuestionCommand, AdvanceQuestionHandler};
pub use clear_selection::{ClearSelectionCommand, ClearSelectionHandler};
pub use progress::QuizProgress;
pub use reset_quiz::{ResetQuizCommand, ResetQuizHandler, ResetQuizResult};
pub use start_quiz::{StartQuizCommand, StartQuizHandler, StartQuizResult};
pub use toggle_option::{ToggleOptionCommand, ToggleOptionHandler};
