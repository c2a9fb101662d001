//! Per-user quiz session value.
//!
//! A session only exists while a quiz is active: it is created on start and
//! dropped on completion or reset. The engines never mutate a session in
//! place; they take `&QuizSession` and return the next value.

use std::collections::HashMap;

use super::bank::QuestionBank;
use crate::domain::foundation::{CategoryCode, OptionId};

/// Accumulated points per category.
pub type Scores = HashMap<CategoryCode, i64>;

/// State of one user's quiz in progress.
///
/// # Invariants
///
/// - `question_index` never decreases while the session lives
/// - `selection` only holds options of the current question
/// - `scores` has a key for every category of the bank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    question_index: usize,
    selection: Vec<OptionId>,
    scores: Scores,
}

impl QuizSession {
    /// Fresh session at the first question with every category at zero.
    pub fn start(bank: &QuestionBank) -> Self {
        let scores = bank
            .categories()
            .iter()
            .map(|c| (c.code().clone(), 0))
            .collect();
        Self {
            question_index: 0,
            selection: Vec::new(),
            scores,
        }
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    /// Options chosen so far for the current question, in insertion order.
    pub fn selection(&self) -> &[OptionId] {
        &self.selection
    }

    pub fn is_selected(&self, option: OptionId) -> bool {
        self.selection.contains(&option)
    }

    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    pub fn score_of(&self, code: &CategoryCode) -> i64 {
        self.scores.get(code).copied().unwrap_or(0)
    }

    pub(crate) fn with_selection(&self, selection: Vec<OptionId>) -> Self {
        Self {
            selection,
            ..self.clone()
        }
    }

    pub(crate) fn with_scores(&self, scores: Scores) -> Self {
        Self {
            scores,
            selection: Vec::new(),
            ..self.clone()
        }
    }

    /// Moves to the next question, dropping any selection.
    pub(crate) fn next_question(self) -> Self {
        Self {
            question_index: self.question_index + 1,
            selection: Vec::new(),
            scores: self.scores,
        }
    }
}
