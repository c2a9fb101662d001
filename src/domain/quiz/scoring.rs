//! Scoring engine - folds a finalized answer into the session's scores.

use super::bank::Question;
use super::session::QuizSession;
use crate::domain::foundation::OptionId;

/// Adds the awards of every chosen option to the session scores.
///
/// Ids that are not options of `question` are skipped: they come from stale
/// client state and carry no points. The returned session has an empty
/// selection, since applying awards is the finalization boundary.
pub fn apply_awards(question: &Question, chosen: &[OptionId], session: &QuizSession) -> QuizSession {
    let mut scores = session.scores().clone();

    for option in chosen.iter().filter_map(|id| question.option(*id)) {
        for award in option.awards() {
            *scores.entry(award.category.clone()).or_insert(0) += award.points;
        }
    }

    session.with_scores(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quiz::test_support::{code, sample_bank};
    use proptest::prelude::*;

    #[test]
    fn adds_points_for_each_award() {
        let bank = sample_bank();
        let question = bank.question(1).unwrap();
        let session = QuizSession::start(&bank);

        let scored = apply_awards(question, &[OptionId::new(1), OptionId::new(2)], &session);

        assert_eq!(scored.score_of(&code("IN")), 2);
        assert_eq!(scored.score_of(&code("PR")), 1);
        assert_eq!(scored.score_of(&code("PA")), 2);
    }

    #[test]
    fn unknown_option_ids_are_ignored() {
        let bank = sample_bank();
        let question = bank.question(0).unwrap();
        let session = QuizSession::start(&bank);

        let scored = apply_awards(question, &[OptionId::new(99)], &session);

        assert_eq!(scored.scores(), session.scores());
    }

    #[test]
    fn clears_selection() {
        let bank = sample_bank();
        let question = bank.question(1).unwrap();
        let session = QuizSession::start(&bank).with_selection(vec![OptionId::new(1)]);

        let scored = apply_awards(question, &[OptionId::new(1)], &session);

        assert!(scored.selection().is_empty());
        assert_eq!(scored.question_index(), session.question_index());
    }

    #[test]
    fn accumulates_on_top_of_existing_scores() {
        let bank = sample_bank();
        let question = bank.question(0).unwrap();
        let session = QuizSession::start(&bank);

        let once = apply_awards(question, &[OptionId::new(1)], &session);
        let twice = apply_awards(question, &[OptionId::new(1)], &once);

        let gained = once.score_of(&code("IN"));
        assert!(gained > 0);
        assert_eq!(twice.score_of(&code("IN")), gained * 2);
    }

    proptest! {
        #[test]
        fn scoring_is_order_independent(order in Just(vec![1u32, 2, 3, 4]).prop_shuffle()) {
            let bank = sample_bank();
            let question = bank.question(1).unwrap();
            let session = QuizSession::start(&bank);

            let ordered: Vec<OptionId> = [1u32, 2, 3, 4].iter().map(|&i| OptionId::new(i)).collect();
            let shuffled: Vec<OptionId> = order.iter().map(|&i| OptionId::new(i)).collect();

            let a = apply_awards(question, &ordered, &session);
            let b = apply_awards(question, &shuffled, &session);

            prop_assert_eq!(a.scores(), b.scores());
            prop_assert_eq!(a.score_of(&code("LU")), 2);
        }
    }
}
