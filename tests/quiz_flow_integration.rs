//! Integration tests for complete quiz runs.
//!
//! These tests drive the public API end to end:
//! 1. The bundled question bank loads and validates
//! 2. The dispatcher walks a user through every question to the summary
//! 3. Concurrent users never see each other's state

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use motivation_quiz_bot::adapters::storage::InMemorySessionStore;
use motivation_quiz_bot::application::{QuizBot, GREETING};
use motivation_quiz_bot::domain::foundation::{CategoryCode, UserId};
use motivation_quiz_bot::domain::quiz::{BankError, Button, QuestionBank, QuizError};
use motivation_quiz_bot::ports::{
    BotCommand, CallbackEvent, ChatTransport, InboundEvent, InboundUpdate, MessageRef,
    SessionStore, TransportError,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Records everything the bot sends, per chat.
#[derive(Default)]
struct RecordingTransport {
    messages: Mutex<Vec<(i64, String, usize)>>,
    answers: Mutex<Vec<(String, Option<String>, bool)>>,
}

impl RecordingTransport {
    fn messages_for(&self, chat_id: i64) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(chat, _, _)| *chat == chat_id)
            .map(|(_, text, _)| text.clone())
            .collect()
    }

    fn alerts(&self) -> Vec<String> {
        self.answers
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, _, alert)| *alert)
            .filter_map(|(_, notice, _)| notice.clone())
            .collect()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        buttons: Option<&[Button]>,
    ) -> Result<(), TransportError> {
        self.messages.lock().unwrap().push((
            chat_id,
            text.to_string(),
            buttons.map(|b| b.len()).unwrap_or(0),
        ));
        Ok(())
    }

    async fn edit_reply_markup(
        &self,
        _message: MessageRef,
        _buttons: Option<&[Button]>,
    ) -> Result<(), TransportError> {
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        notice: Option<&str>,
        show_alert: bool,
    ) -> Result<(), TransportError> {
        self.answers.lock().unwrap().push((
            callback_id.to_string(),
            notice.map(str::to_string),
            show_alert,
        ));
        Ok(())
    }
}

fn bundled_bank() -> QuestionBank {
    QuestionBank::load(concat!(env!("CARGO_MANIFEST_DIR"), "/questions.json"))
        .expect("bundled question bank must be valid")
}

fn start(user: i64) -> InboundUpdate {
    InboundUpdate {
        update_id: 0,
        event: InboundEvent::Command {
            user_id: UserId::new(user),
            chat_id: user,
            command: BotCommand::Start,
        },
    }
}

fn press(user: i64, data: &str) -> InboundUpdate {
    InboundUpdate {
        update_id: 0,
        event: InboundEvent::Callback(CallbackEvent {
            callback_id: format!("{}:{}", user, data),
            user_id: UserId::new(user),
            message: Some(MessageRef {
                chat_id: user,
                message_id: 1,
            }),
            data: Some(data.to_string()),
        }),
    }
}

struct Harness {
    store: Arc<InMemorySessionStore>,
    transport: Arc<RecordingTransport>,
    bot: QuizBot,
}

impl Harness {
    fn new() -> Self {
        let store = Arc::new(InMemorySessionStore::new());
        let transport = Arc::new(RecordingTransport::default());
        let bot = QuizBot::new(store.clone(), Arc::new(bundled_bank()), transport.clone());
        Self {
            store,
            transport,
            bot,
        }
    }

    async fn send(&self, updates: Vec<InboundUpdate>) {
        for update in updates {
            self.bot.handle_update(update).await.unwrap();
        }
    }
}

/// Answers every question of the bundled bank with the "professional" option.
fn professional_run(user: i64) -> Vec<InboundUpdate> {
    vec![
        start(user),
        press(user, "opt|1|2"),
        press(user, "opt|2|2"),
        press(user, "opt|2|4"),
        press(user, "next|2"),
        press(user, "opt|3|2"),
        press(user, "opt|3|4"),
        press(user, "next|3"),
        press(user, "opt|4|2"),
        press(user, "opt|5|2"),
        press(user, "next|5"),
    ]
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn bundled_bank_is_valid() {
    let bank = bundled_bank();

    assert_eq!(bank.len(), 5);
    let codes: Vec<&str> = bank.categories().iter().map(|c| c.code().as_str()).collect();
    assert_eq!(codes, vec!["IN", "PR", "PA", "HO", "LU"]);
    assert_eq!(bank.tie_threshold(), 2);
    assert!(bank.questions().iter().any(|q| !q.is_single_select()));
}

#[test]
fn bank_with_unknown_award_category_is_rejected() {
    let source = r#"{
        "meta": {"types": {"A": {"name": "Alpha"}}},
        "questions": [{"id": 1, "text": "Q", "options": [
            {"id": 1, "text": "x", "awards": [{"type": "B"}]}
        ]}]
    }"#;

    let err = QuestionBank::from_json_str(source).unwrap_err();

    assert_eq!(
        err,
        BankError::UnknownCategory {
            question: 1,
            option: 1,
            category: "B".to_string()
        }
    );
}

#[tokio::test]
async fn complete_run_produces_sole_leader_summary() {
    let harness = Harness::new();

    harness.send(professional_run(1)).await;

    let messages = harness.transport.messages_for(1);
    assert_eq!(messages[0], GREETING);
    // Greeting, five questions, summary.
    assert_eq!(messages.len(), 7);

    let summary = messages.last().unwrap();
    assert!(summary.starts_with("🏁 Done! Your results:"));
    assert!(summary.contains("• Professional (PR): 8"));
    assert!(summary.contains("• Master (HO): 3"));
    assert!(summary.contains("Leading type: Professional."));
    assert!(summary.contains("Professional: Give hard problems"));
    assert!(!summary.contains("Master: "));
    assert!(harness.transport.alerts().is_empty());

    assert_eq!(
        harness.store.get(UserId::new(1)).await,
        Err(QuizError::NotFound)
    );
}

#[tokio::test]
async fn out_of_range_presses_are_rejected_without_side_effects() {
    let harness = Harness::new();
    harness
        .send(vec![start(1), press(1, "opt|1|1"), press(1, "opt|2|1")])
        .await;
    let before = harness.store.get(UserId::new(1)).await.unwrap();

    harness
        .send(vec![
            press(1, "opt|1|2"),
            press(1, "next|3"),
            press(1, "opt|2|2"),
            press(1, "opt|2|3"),
        ])
        .await;

    assert_eq!(
        harness.transport.alerts(),
        vec![
            "You have already answered this question, move on to the next one.".to_string(),
            "We haven't reached this question yet 🙂".to_string(),
            "You can choose at most 2.".to_string(),
        ]
    );
    let after = harness.store.get(UserId::new(1)).await.unwrap();
    assert_eq!(after.question_index(), before.question_index());
    assert_eq!(after.scores(), before.scores());
    assert_eq!(after.selection().len(), 2);
}

#[tokio::test]
async fn advance_below_minimum_keeps_question() {
    let harness = Harness::new();
    harness
        .send(vec![
            start(1),
            press(1, "opt|1|1"),
            press(1, "opt|2|1"),
            press(1, "next|2"),
            press(1, "opt|3|1"),
            press(1, "next|3"),
        ])
        .await;

    assert_eq!(
        harness.transport.alerts(),
        vec!["Choose between 2 and 3 options.".to_string()]
    );
    let session = harness.store.get(UserId::new(1)).await.unwrap();
    assert_eq!(session.question_index(), 2);
    let instrumental = CategoryCode::new("IN").unwrap();
    assert_eq!(session.score_of(&instrumental), 3);
}

#[tokio::test]
async fn concurrent_users_are_isolated() {
    let store = Arc::new(InMemorySessionStore::new());
    let transport = Arc::new(RecordingTransport::default());
    let bot = Arc::new(QuizBot::new(
        store.clone(),
        Arc::new(bundled_bank()),
        transport.clone(),
    ));

    let tasks: Vec<_> = (1..=20)
        .map(|user| {
            let bot = bot.clone();
            tokio::spawn(async move {
                for update in professional_run(user) {
                    bot.handle_update(update).await.unwrap();
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    for user in 1..=20 {
        let messages = transport.messages_for(user);
        assert_eq!(messages.len(), 7, "user {}", user);
        assert!(messages[6].contains("• Professional (PR): 8"));
    }
    assert!(transport.alerts().is_empty());
}
