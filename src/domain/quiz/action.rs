//! Interactive action tokens.
//!
//! Every control rendered for a question carries a compact token naming the
//! action and the question it belongs to, so a press can be checked against
//! the session's current question before anything changes.
//!
//! | Action  | Token                       |
//! |---------|-----------------------------|
//! | Toggle  | `opt|<question>|<option>`   |
//! | Advance | `next|<question>`           |
//! | Clear   | `clear|<question>`          |

use std::fmt;
use std::str::FromStr;

use super::errors::QuizError;
use crate::domain::foundation::{OptionId, QuestionId};

/// An action targeting a specific question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    Toggle {
        question: QuestionId,
        option: OptionId,
    },
    Advance {
        question: QuestionId,
    },
    Clear {
        question: QuestionId,
    },
}

impl QuizAction {
    pub fn question(&self) -> QuestionId {
        match self {
            QuizAction::Toggle { question, .. }
            | QuizAction::Advance { question }
            | QuizAction::Clear { question } => *question,
        }
    }

    /// Encodes the action as a token.
    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QuizAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizAction::Toggle { question, option } => write!(f, "opt|{}|{}", question, option),
            QuizAction::Advance { question } => write!(f, "next|{}", question),
            QuizAction::Clear { question } => write!(f, "clear|{}", question),
        }
    }
}

impl FromStr for QuizAction {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('|');
        let kind = parts.next().ok_or(QuizError::UnknownAction)?;
        let question: QuestionId = parts
            .next()
            .ok_or(QuizError::UnknownAction)?
            .parse()
            .map_err(|_| QuizError::UnknownAction)?;

        let action = match kind {
            "opt" => {
                let option: OptionId = parts
                    .next()
                    .ok_or(QuizError::UnknownAction)?
                    .parse()
                    .map_err(|_| QuizError::UnknownAction)?;
                QuizAction::Toggle { question, option }
            }
            "next" => QuizAction::Advance { question },
            "clear" => QuizAction::Clear { question },
            _ => return Err(QuizError::UnknownAction),
        };

        if parts.next().is_some() {
            return Err(QuizError::UnknownAction);
        }
        Ok(action)
    }
}
