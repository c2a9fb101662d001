//! Question rendering.
//!
//! A view is a pure function of (question, selection). Transport adapters
//! turn it into whatever widget set their platform offers.

use super::action::QuizAction;
use super::bank::Question;
use crate::domain::foundation::{OptionId, QuestionId};

const SELECTED_MARKER: &str = "✅ ";
const UNSELECTED_MARKER: &str = "◻️ ";

/// One option row of a rendered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub option_id: OptionId,
    pub text: String,
    pub selected: bool,
}

impl OptionView {
    /// Option text prefixed with its selection marker.
    pub fn label(&self) -> String {
        let marker = if self.selected {
            SELECTED_MARKER
        } else {
            UNSELECTED_MARKER
        };
        format!("{}{}", marker, self.text)
    }
}

/// Extra controls offered on multi-select questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Advance,
    Clear,
}

impl Control {
    pub fn label(&self) -> &'static str {
        match self {
            Control::Advance => "➡️ Next",
            Control::Clear => "🔄 Clear selection",
        }
    }
}

/// A control: its label plus the action token it fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: QuizAction,
}

/// Displayable state of the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub question_id: QuestionId,
    pub text: String,
    pub options: Vec<OptionView>,
    pub controls: Vec<Control>,
}

impl QuestionView {
    pub fn render(question: &Question, selection: &[OptionId]) -> Self {
        let options = question
            .options()
            .iter()
            .map(|o| OptionView {
                option_id: o.id(),
                text: o.text().to_string(),
                selected: selection.contains(&o.id()),
            })
            .collect();

        let controls = if question.is_single_select() {
            Vec::new()
        } else {
            vec![Control::Advance, Control::Clear]
        };

        Self {
            question_id: question.id(),
            text: question.text().to_string(),
            options,
            controls,
        }
    }

    /// Buttons in display order: one per option, then the controls.
    pub fn buttons(&self) -> Vec<Button> {
        let question = self.question_id;
        let options = self.options.iter().map(|o| Button {
            label: o.label(),
            action: QuizAction::Toggle {
                question,
                option: o.option_id,
            },
        });
        let controls = self.controls.iter().map(|c| Button {
            label: c.label().to_string(),
            action: match c {
                Control::Advance => QuizAction::Advance { question },
                Control::Clear => QuizAction::Clear { question },
            },
        });
        options.chain(controls).collect()
    }

    pub fn selected(&self) -> Vec<OptionId> {
        self.options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.option_id)
            .collect()
    }
}
