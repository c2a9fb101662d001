//! Question bank - the immutable quiz catalog.
//!
//! The bank is parsed once at startup from a JSON document and validated
//! before any session can start. Afterwards it is shared read-only
//! (`Arc<QuestionBank>`) by every session.
//!
//! # Source format
//!
//! ```json
//! {
//!   "meta": {
//!     "types": { "IN": { "name": "Instrumental", "advice": "...", "summary": "..." } },
//!     "scoring": { "tie_threshold": 2 }
//!   },
//!   "questions": [
//!     { "id": 1, "text": "...", "min_select": 1, "max_select": 2,
//!       "options": [ { "id": 1, "text": "...", "awards": [ { "type": "IN", "points": 2 } ] } ] }
//!   ]
//! }
//! ```
//!
//! Category order is the declaration order inside `meta.types`; it is the
//! tie-break order used by ranking.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use super::errors::BankError;
use crate::domain::foundation::{CategoryCode, OptionId, QuestionId};

/// Tie threshold used when the source omits `meta.scoring.tie_threshold`.
pub const DEFAULT_TIE_THRESHOLD: u32 = 2;

/// A (category, points) pair applied when its option is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Award {
    pub category: CategoryCode,
    pub points: i64,
}

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    id: OptionId,
    text: String,
    awards: Vec<Award>,
}

impl AnswerOption {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id: OptionId::new(id),
            text: text.into(),
            awards: Vec::new(),
        }
    }

    /// Adds an award; codes are checked when the bank is assembled.
    pub fn with_award(mut self, category: CategoryCode, points: i64) -> Self {
        self.awards.push(Award { category, points });
        self
    }

    pub fn id(&self) -> OptionId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn awards(&self) -> &[Award] {
        &self.awards
    }
}

/// A quiz question with its selection contract.
///
/// # Invariants
///
/// - `1 <= min_select <= max_select <= options.len()`
/// - option ids are unique within the question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<AnswerOption>,
    min_select: usize,
    max_select: usize,
}

impl Question {
    /// Creates a single-select question (`min_select = max_select = 1`).
    pub fn new(id: u32, text: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            id: QuestionId::new(id),
            text: text.into(),
            options,
            min_select: 1,
            max_select: 1,
        }
    }

    pub fn with_bounds(mut self, min_select: usize, max_select: usize) -> Self {
        self.min_select = min_select;
        self.max_select = max_select;
        self
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    pub fn min_select(&self) -> usize {
        self.min_select
    }

    pub fn max_select(&self) -> usize {
        self.max_select
    }

    /// Single-select questions finalize on the first toggle.
    pub fn is_single_select(&self) -> bool {
        self.max_select == 1
    }

    pub fn option(&self, id: OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Returns true if a selection of `count` options may be submitted.
    pub fn accepts_count(&self, count: usize) -> bool {
        (self.min_select..=self.max_select).contains(&count)
    }

    fn validate(&self, categories: &[Category]) -> Result<(), BankError> {
        let question = self.id.as_u32();

        if self.options.is_empty() {
            return Err(BankError::NoOptions { question });
        }

        if self.min_select == 0
            || self.min_select > self.max_select
            || self.max_select > self.options.len()
        {
            return Err(BankError::InvalidBounds {
                question,
                min: self.min_select,
                max: self.max_select,
                options: self.options.len(),
            });
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.id) {
                return Err(BankError::DuplicateOption {
                    question,
                    option: option.id.as_u32(),
                });
            }
            for award in &option.awards {
                if !categories.iter().any(|c| c.code == award.category) {
                    return Err(BankError::UnknownCategory {
                        question,
                        option: option.id.as_u32(),
                        category: award.category.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// A scored dimension of the quiz outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    code: CategoryCode,
    name: String,
    advice: Option<String>,
    summary: Option<String>,
}

impl Category {
    pub fn new(code: CategoryCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            advice: None,
            summary: None,
        }
    }

    pub fn with_advice(mut self, advice: impl Into<String>) -> Self {
        self.advice = Some(advice.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn code(&self) -> &CategoryCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Advice text, falling back to the summary; blank texts count as absent.
    pub fn advice_or_summary(&self) -> Option<&str> {
        self.advice
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.summary.as_deref().filter(|s| !s.trim().is_empty()))
    }
}

/// Scoring parameters of the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Largest gap between the top two categories still reported as a tie.
    pub tie_threshold: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tie_threshold: DEFAULT_TIE_THRESHOLD,
        }
    }
}

/// Validated, read-only quiz catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
    categories: Vec<Category>,
    scoring: ScoringConfig,
}

impl QuestionBank {
    /// Assembles a bank from already-built parts, validating every invariant.
    ///
    /// # Errors
    ///
    /// Returns `BankError` describing the first violated invariant.
    pub fn new(
        questions: Vec<Question>,
        categories: Vec<Category>,
        scoring: ScoringConfig,
    ) -> Result<Self, BankError> {
        if categories.is_empty() {
            return Err(BankError::NoCategories);
        }
        let mut codes = HashSet::new();
        for category in &categories {
            if !codes.insert(category.code.clone()) {
                return Err(BankError::InvalidCategory {
                    code: category.code.to_string(),
                    reason: "declared twice".to_string(),
                });
            }
        }

        if questions.is_empty() {
            return Err(BankError::NoQuestions);
        }
        let mut ids = HashSet::new();
        for question in &questions {
            if !ids.insert(question.id) {
                return Err(BankError::DuplicateQuestion {
                    question: question.id.as_u32(),
                });
            }
            question.validate(&categories)?;
        }

        Ok(Self {
            questions,
            categories,
            scoring,
        })
    }

    /// Parses and validates a bank from a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, BankError> {
        let raw: RawBank =
            serde_json::from_str(source).map_err(|e| BankError::Parse(e.to_string()))?;
        raw.into_bank()
    }

    /// Reads, parses and validates a bank from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BankError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| BankError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&source)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Question at catalog position `index`, if any.
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Catalog position of the question with `id`.
    pub fn position_of(&self, id: QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, code: &CategoryCode) -> Option<&Category> {
        self.categories.iter().find(|c| &c.code == code)
    }

    pub fn tie_threshold(&self) -> u32 {
        self.scoring.tie_threshold
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Source document
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct RawBank {
    questions: Vec<RawQuestion>,
    meta: RawMeta,
}

#[derive(Debug, Deserialize)]
struct RawMeta {
    // Kept as a JSON map so declaration order survives deserialization.
    types: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    scoring: RawScoring,
}

#[derive(Debug, Deserialize)]
struct RawScoring {
    #[serde(default = "default_tie_threshold")]
    tie_threshold: u32,
}

impl Default for RawScoring {
    fn default() -> Self {
        Self {
            tie_threshold: DEFAULT_TIE_THRESHOLD,
        }
    }
}

fn default_tie_threshold() -> u32 {
    DEFAULT_TIE_THRESHOLD
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    name: Option<String>,
    advice: Option<String>,
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    id: u32,
    text: String,
    options: Vec<RawOption>,
    min_select: Option<usize>,
    max_select: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    id: u32,
    text: String,
    #[serde(default)]
    awards: Vec<RawAward>,
}

#[derive(Debug, Deserialize)]
struct RawAward {
    #[serde(rename = "type")]
    category: String,
    #[serde(default = "default_points")]
    points: i64,
}

fn default_points() -> i64 {
    1
}

impl RawBank {
    fn into_bank(self) -> Result<QuestionBank, BankError> {
        let mut categories = Vec::with_capacity(self.meta.types.len());
        for (code, value) in self.meta.types {
            let raw: RawCategory =
                serde_json::from_value(value).map_err(|e| BankError::InvalidCategory {
                    code: code.clone(),
                    reason: e.to_string(),
                })?;
            let code_value = CategoryCode::new(code.clone()).map_err(|e| {
                BankError::InvalidCategory {
                    code: code.clone(),
                    reason: e.to_string(),
                }
            })?;
            categories.push(Category {
                name: raw.name.unwrap_or_else(|| code.clone()),
                code: code_value,
                advice: raw.advice,
                summary: raw.summary,
            });
        }

        let mut questions = Vec::with_capacity(self.questions.len());
        for raw in self.questions {
            let mut options = Vec::with_capacity(raw.options.len());
            for option in raw.options {
                let mut awards = Vec::with_capacity(option.awards.len());
                for award in option.awards {
                    let category = CategoryCode::new(award.category.clone()).map_err(|_| {
                        BankError::UnknownCategory {
                            question: raw.id,
                            option: option.id,
                            category: award.category.clone(),
                        }
                    })?;
                    awards.push(Award {
                        category,
                        points: award.points,
                    });
                }
                options.push(AnswerOption {
                    id: OptionId::new(option.id),
                    text: option.text,
                    awards,
                });
            }
            questions.push(Question {
                id: QuestionId::new(raw.id),
                text: raw.text,
                options,
                min_select: raw.min_select.unwrap_or(1),
                max_select: raw.max_select.unwrap_or(1),
            });
        }

        QuestionBank::new(
            questions,
            categories,
            ScoringConfig {
                tie_threshold: self.meta.scoring.tie_threshold,
            },
        )
    }
}
