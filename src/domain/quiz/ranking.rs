//! Ranking & summary engine.
//!
//! Runs once, when the last question is finalized. Categories are ranked by
//! score (descending, ties in declaration order) and the top two are compared
//! against the bank's tie threshold to pick a sole leader or a co-leading pair.

use std::fmt;

use super::bank::{Category, QuestionBank};
use super::errors::{BankError, QuizError};
use super::session::Scores;
use crate::domain::foundation::CategoryCode;

/// One line of the ranked listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCategory {
    pub code: CategoryCode,
    pub name: String,
    pub score: i64,
    /// Advice text, or the summary when no advice is declared.
    pub advice: Option<String>,
}

/// Outcome of comparing the top two categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leadership {
    Sole(RankedCategory),
    CoLeading {
        first: RankedCategory,
        second: RankedCategory,
        gap: i64,
    },
}

/// Final result of a completed quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    ranked: Vec<RankedCategory>,
    leadership: Leadership,
}

impl QuizSummary {
    /// All categories, highest score first.
    pub fn ranked(&self) -> &[RankedCategory] {
        &self.ranked
    }

    pub fn leadership(&self) -> &Leadership {
        &self.leadership
    }

    /// Codes of the leading category or pair.
    pub fn leaders(&self) -> Vec<&CategoryCode> {
        match &self.leadership {
            Leadership::Sole(top) => vec![&top.code],
            Leadership::CoLeading { first, second, .. } => vec![&first.code, &second.code],
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self.leadership, Leadership::CoLeading { .. })
    }
}

/// Ranks `scores` over `categories` and decides the leadership.
///
/// # Errors
///
/// `MalformedBank` if `categories` is empty; a loaded bank never is.
pub fn summarize(
    scores: &Scores,
    categories: &[Category],
    tie_threshold: u32,
) -> Result<QuizSummary, QuizError> {
    let mut ranked: Vec<RankedCategory> = categories
        .iter()
        .map(|c| RankedCategory {
            code: c.code().clone(),
            name: c.name().to_string(),
            score: scores.get(c.code()).copied().unwrap_or(0),
            advice: c.advice_or_summary().map(str::to_string),
        })
        .collect();

    // Stable: equal scores keep declaration order.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    let leadership = match (ranked.first(), ranked.get(1)) {
        (Some(first), Some(second)) if first.score - second.score <= i64::from(tie_threshold) => {
            Leadership::CoLeading {
                gap: first.score - second.score,
                first: first.clone(),
                second: second.clone(),
            }
        }
        (Some(first), _) => Leadership::Sole(first.clone()),
        (None, _) => return Err(BankError::NoCategories.into()),
    };

    Ok(QuizSummary { ranked, leadership })
}

/// Convenience wrapper using the bank's categories and threshold.
pub fn summarize_for(bank: &QuestionBank, scores: &Scores) -> Result<QuizSummary, QuizError> {
    summarize(scores, bank.categories(), bank.tie_threshold())
}

impl fmt::Display for QuizSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🏁 Done! Your results:")?;
        for entry in &self.ranked {
            writeln!(f, "• {} ({}): {}", entry.name, entry.code, entry.score)?;
        }

        match &self.leadership {
            Leadership::CoLeading { first, second, gap } => {
                writeln!(
                    f,
                    "\n🔸 Leading types: {} and {} (gap {}).",
                    first.name, second.name, gap
                )?;
                for leader in [first, second] {
                    if let Some(advice) = &leader.advice {
                        writeln!(f, "\n{}: {}", leader.name, advice)?;
                    }
                }
            }
            Leadership::Sole(top) => {
                writeln!(f, "\n🔸 Leading type: {}.", top.name)?;
                if let Some(advice) = &top.advice {
                    writeln!(f, "\n{}: {}", top.name, advice)?;
                }
            }
        }

        write!(f, "\nCommands: /start to take the quiz again, /reset to reset.")
    }
}
