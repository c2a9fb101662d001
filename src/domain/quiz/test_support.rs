//! Shared fixtures for quiz unit tests.

use super::bank::{AnswerOption, Category, Question, QuestionBank, ScoringConfig};
use crate::domain::foundation::CategoryCode;

pub fn code(s: &str) -> CategoryCode {
    CategoryCode::new(s).unwrap()
}

/// Four questions over five categories:
///
/// 1. single-select
/// 2. multi-select, 1..=2 of 4
/// 3. multi-select, 2..=3 of 4
/// 4. single-select
pub fn sample_bank() -> QuestionBank {
    let categories = vec![
        Category::new(code("IN"), "Instrumental").with_advice("Tie pay to results."),
        Category::new(code("PR"), "Professional").with_summary("Values mastery."),
        Category::new(code("PA"), "Patriotic").with_advice("Show the mission."),
        Category::new(code("HO"), "Master"),
        Category::new(code("LU"), "Avoidant").with_summary("Avoids effort."),
    ];

    let questions = vec![
        Question::new(
            1,
            "What matters most at work?",
            vec![
                AnswerOption::new(1, "Salary").with_award(code("IN"), 2),
                AnswerOption::new(2, "Growth")
                    .with_award(code("PR"), 1)
                    .with_award(code("PA"), 1),
                AnswerOption::new(3, "Nothing much").with_award(code("LU"), 1),
            ],
        ),
        Question::new(
            2,
            "Pick up to two",
            vec![
                AnswerOption::new(1, "Bonus")
                    .with_award(code("IN"), 2)
                    .with_award(code("PA"), 1),
                AnswerOption::new(2, "Challenging tasks")
                    .with_award(code("PR"), 1)
                    .with_award(code("PA"), 1),
                AnswerOption::new(3, "Autonomy").with_award(code("HO"), 1),
                AnswerOption::new(4, "Quiet days").with_award(code("LU"), 2),
            ],
        )
        .with_bounds(1, 2),
        Question::new(
            3,
            "Pick two or three",
            vec![
                AnswerOption::new(1, "Own my work").with_award(code("HO"), 2),
                AnswerOption::new(2, "Learn").with_award(code("PR"), 2),
                AnswerOption::new(3, "Earn").with_award(code("IN"), 1),
                AnswerOption::new(4, "Rest").with_award(code("LU"), 1),
            ],
        )
        .with_bounds(2, 3),
        Question::new(
            4,
            "Last one",
            vec![
                AnswerOption::new(1, "Serve").with_award(code("PA"), 3),
                AnswerOption::new(2, "Decide").with_award(code("HO"), 1),
            ],
        ),
    ];

    QuestionBank::new(questions, categories, ScoringConfig::default()).unwrap()
}
