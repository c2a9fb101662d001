//! Application layer - Commands, Handlers, and the update dispatcher.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Transport adapters hand every inbound update to [`QuizBot`], which routes
//! it to a command handler and renders the outcome through the chat port.

pub mod handlers;
mod quiz_bot;

pub use handlers::{
    AdvanceQuestionCommand, AdvanceQuestionHandler, ClearSelectionCommand, ClearSelectionHandler,
    QuizProgress, ResetQuizCommand, ResetQuizHandler, ResetQuizResult, StartQuizCommand,
    StartQuizHandler, StartQuizResult, ToggleOptionCommand, ToggleOptionHandler,
};
pub use quiz_bot::{QuizBot, GREETING, RESET_NOTICE};
