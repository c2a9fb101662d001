//! Quiz-specific error types.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Why an action was rejected as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// The action names a question the user has already moved past.
    AlreadyAnswered,
    /// The action names a question the user has not reached.
    NotReachedYet,
}

/// Reasons a question bank fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error("cannot read question bank: {0}")]
    Io(String),

    #[error("cannot parse question bank: {0}")]
    Parse(String),

    #[error("question bank has no questions")]
    NoQuestions,

    #[error("question bank declares no categories")]
    NoCategories,

    #[error("invalid category '{code}': {reason}")]
    InvalidCategory { code: String, reason: String },

    #[error("duplicate question id {question}")]
    DuplicateQuestion { question: u32 },

    #[error("question {question} has no options")]
    NoOptions { question: u32 },

    #[error("question {question} repeats option id {option}")]
    DuplicateOption { question: u32, option: u32 },

    #[error("question {question}, option {option} awards unknown category '{category}'")]
    UnknownCategory {
        question: u32,
        option: u32,
        category: String,
    },

    #[error(
        "question {question} has invalid selection bounds min={min} max={max} with {options} options"
    )]
    InvalidBounds {
        question: u32,
        min: usize,
        max: usize,
        options: usize,
    },
}

/// Errors produced by the quiz engines.
///
/// Everything except `MalformedBank` is non-fatal: the session is left
/// untouched and the user sees [`QuizError::user_message`] as a notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("malformed question bank: {0}")]
    MalformedBank(#[from] BankError),

    #[error("no active quiz session")]
    NotFound,

    #[error("stale action: {0:?}")]
    StaleAction(Staleness),

    #[error("unrecognised action token")]
    UnknownAction,

    #[error("selection limit of {max} reached")]
    SelectionLimitExceeded { max: usize },

    #[error("selection must contain between {min} and {max} options")]
    SelectionCountInvalid { min: usize, max: usize },
}

impl QuizError {
    pub fn already_answered() -> Self {
        QuizError::StaleAction(Staleness::AlreadyAnswered)
    }

    pub fn not_reached_yet() -> Self {
        QuizError::StaleAction(Staleness::NotReachedYet)
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            QuizError::MalformedBank(_) => ErrorCode::MalformedBank,
            QuizError::NotFound => ErrorCode::SessionNotFound,
            QuizError::StaleAction(_) => ErrorCode::StaleAction,
            QuizError::UnknownAction => ErrorCode::UnknownAction,
            QuizError::SelectionLimitExceeded { .. } => ErrorCode::SelectionLimitExceeded,
            QuizError::SelectionCountInvalid { .. } => ErrorCode::SelectionCountInvalid,
        }
    }

    /// Text shown to the user as an ephemeral notice.
    pub fn user_message(&self) -> String {
        match self {
            QuizError::MalformedBank(_) => "The quiz is unavailable right now.".to_string(),
            QuizError::NotFound => "No quiz in progress. Type /start to begin.".to_string(),
            QuizError::StaleAction(Staleness::AlreadyAnswered) => {
                "You have already answered this question, move on to the next one.".to_string()
            }
            QuizError::StaleAction(Staleness::NotReachedYet) => {
                "We haven't reached this question yet 🙂".to_string()
            }
            QuizError::UnknownAction => "Unknown button.".to_string(),
            QuizError::SelectionLimitExceeded { max } => {
                format!("You can choose at most {}.", max)
            }
            QuizError::SelectionCountInvalid { min, max } => {
                format!("Choose between {} and {} options.", min, max)
            }
        }
    }
}
