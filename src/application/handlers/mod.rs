//! Command handlers for the application layer.

pub mod quiz;

pub use quiz::{
    AdvanceQuestionCommand, AdvanceQuestionHandler, ClearSelectionCommand, ClearSelectionHandler,
    QuizProgress, ResetQuizCommand, ResetQuizHandler, ResetQuizResult, StartQuizCommand,
    StartQuizHandler, StartQuizResult, ToggleOptionCommand, ToggleOptionHandler,
};
