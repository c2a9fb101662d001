//! QuizBot - Routes inbound updates to command handlers and renders results.
//!
//! Both run modes (long polling and webhook) feed the same dispatcher, so
//! the quiz behaves identically regardless of how updates arrive.
//!
//! # Rendering rules
//!
//! - `/start` sends a greeting followed by the first question.
//! - `/reset` drops the session and sends a notice.
//! - A selection change edits the buttons in place.
//! - A finalized answer removes the old buttons, acknowledges the press and
//!   sends either the next question or the summary.
//! - Rejected actions are answered with an alert; state is untouched.

use std::sync::Arc;

use futures::future::join_all;

use super::handlers::{
    AdvanceQuestionCommand, AdvanceQuestionHandler, ClearSelectionCommand, ClearSelectionHandler,
    QuizProgress, ResetQuizCommand, ResetQuizHandler, StartQuizCommand, StartQuizHandler,
    ToggleOptionCommand, ToggleOptionHandler,
};
use crate::domain::foundation::UserId;
use crate::domain::quiz::{QuestionBank, QuestionView, QuizAction, QuizError};
use crate::ports::{
    BotCommand, CallbackEvent, ChatTransport, InboundEvent, InboundUpdate, SessionStore,
    TransportError,
};

pub const GREETING: &str =
    "Hi! This quiz finds out what motivates you at work. Tap the options below.";
pub const RESET_NOTICE: &str = "Reset done. Type /start to take the quiz again.";

const ANSWER_ACCEPTED: &str = "Answer accepted ✅";
const ANSWERS_ACCEPTED: &str = "Answers accepted ✅";
const SELECTION_CLEARED: &str = "Selection cleared.";

/// Update dispatcher shared by all run modes.
pub struct QuizBot {
    transport: Arc<dyn ChatTransport>,
    start_quiz: StartQuizHandler,
    reset_quiz: ResetQuizHandler,
    toggle_option: ToggleOptionHandler,
    clear_selection: ClearSelectionHandler,
    advance_question: AdvanceQuestionHandler,
}

impl QuizBot {
    pub fn new(
        store: Arc<dyn SessionStore>,
        bank: Arc<QuestionBank>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            transport,
            start_quiz: StartQuizHandler::new(store.clone(), bank.clone()),
            reset_quiz: ResetQuizHandler::new(store.clone()),
            toggle_option: ToggleOptionHandler::new(store.clone(), bank.clone()),
            clear_selection: ClearSelectionHandler::new(store.clone(), bank.clone()),
            advance_question: AdvanceQuestionHandler::new(store, bank),
        }
    }

    /// Handles one update, logging delivery failures instead of returning them.
    pub async fn dispatch(&self, update: InboundUpdate) {
        let update_id = update.update_id;
        if let Err(error) = self.handle_update(update).await {
            tracing::warn!(update_id, error = %error, "Failed to deliver response");
        }
    }

    /// Handles a batch: updates of one user run in arrival order, different
    /// users run concurrently.
    pub async fn dispatch_batch(&self, updates: Vec<InboundUpdate>) {
        let mut groups: Vec<(Option<UserId>, Vec<InboundUpdate>)> = Vec::new();
        for update in updates {
            let user = update.event.user_id();
            match groups.iter_mut().find(|(key, _)| *key == user) {
                Some((_, group)) => group.push(update),
                None => groups.push((user, vec![update])),
            }
        }

        join_all(groups.into_iter().map(|(_, group)| async move {
            for update in group {
                self.dispatch(update).await;
            }
        }))
        .await;
    }

    /// Handles one update.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if a response could not be delivered. Quiz
    /// errors are never returned; they are reported to the user.
    pub async fn handle_update(&self, update: InboundUpdate) -> Result<(), TransportError> {
        match update.event {
            InboundEvent::Command {
                user_id,
                chat_id,
                command,
            } => self.on_command(user_id, chat_id, command).await,
            InboundEvent::Callback(callback) => self.on_callback(callback).await,
            InboundEvent::Ignored => {
                tracing::trace!(update_id = update.update_id, "Ignoring update");
                Ok(())
            }
        }
    }

    async fn on_command(
        &self,
        user_id: UserId,
        chat_id: i64,
        command: BotCommand,
    ) -> Result<(), TransportError> {
        match command {
            BotCommand::Start => {
                match self.start_quiz.handle(StartQuizCommand { user_id }).await {
                    Ok(result) => {
                        tracing::info!(user_id = %user_id, "Quiz started");
                        self.transport.send_message(chat_id, GREETING, None).await?;
                        self.send_question(chat_id, &result.first_question).await
                    }
                    Err(error) => {
                        tracing::error!(user_id = %user_id, error = %error, "Failed to start quiz");
                        self.transport
                            .send_message(chat_id, &error.user_message(), None)
                            .await
                    }
                }
            }
            BotCommand::Reset => {
                let result = self.reset_quiz.handle(ResetQuizCommand { user_id }).await;
                tracing::info!(user_id = %user_id, had_session = result.had_session, "Quiz reset");
                self.transport.send_message(chat_id, RESET_NOTICE, None).await
            }
        }
    }

    async fn on_callback(&self, callback: CallbackEvent) -> Result<(), TransportError> {
        let action = match callback.data.as_deref().map(str::parse::<QuizAction>) {
            Some(Ok(action)) => action,
            _ => return self.reject(&callback, &QuizError::UnknownAction).await,
        };

        let user_id = callback.user_id;
        let outcome = match action {
            QuizAction::Toggle { question, option } => {
                self.toggle_option
                    .handle(ToggleOptionCommand {
                        user_id,
                        question_id: question,
                        option_id: option,
                    })
                    .await
            }
            QuizAction::Advance { question } => {
                self.advance_question
                    .handle(AdvanceQuestionCommand {
                        user_id,
                        question_id: question,
                    })
                    .await
            }
            QuizAction::Clear { question } => {
                self.clear_selection
                    .handle(ClearSelectionCommand {
                        user_id,
                        question_id: question,
                    })
                    .await
            }
        };

        match outcome {
            Ok(progress) => self.render(&callback, action, progress).await,
            Err(error) => self.reject(&callback, &error).await,
        }
    }

    async fn render(
        &self,
        callback: &CallbackEvent,
        action: QuizAction,
        progress: QuizProgress,
    ) -> Result<(), TransportError> {
        let chat_id = callback
            .message
            .map(|m| m.chat_id)
            .unwrap_or_else(|| callback.user_id.as_i64());

        if let QuizProgress::Selecting(view) = &progress {
            if let Some(message) = callback.message {
                if let Err(error) = self
                    .transport
                    .edit_reply_markup(message, Some(view.buttons().as_slice()))
                    .await
                {
                    tracing::warn!(error = %error, "Could not refresh selection buttons");
                }
            }
            let notice = match action {
                QuizAction::Clear { .. } => Some(SELECTION_CLEARED),
                _ => None,
            };
            return self
                .transport
                .answer_callback(&callback.callback_id, notice, false)
                .await;
        }

        tracing::debug!(
            user_id = %callback.user_id,
            question_id = %action.question(),
            "Answer recorded"
        );

        if let Some(message) = callback.message {
            // The old buttons must not be pressed again; a failure here is
            // cosmetic since the guard rejects stale presses anyway.
            if let Err(error) = self.transport.edit_reply_markup(message, None).await {
                tracing::debug!(error = %error, "Could not remove answered buttons");
            }
        }

        let notice = match action {
            QuizAction::Advance { .. } => ANSWERS_ACCEPTED,
            _ => ANSWER_ACCEPTED,
        };
        // The session has already moved on; the next question or summary
        // must go out even when the press can no longer be acknowledged.
        if let Err(error) = self
            .transport
            .answer_callback(&callback.callback_id, Some(notice), false)
            .await
        {
            tracing::warn!(error = %error, "Could not acknowledge answer");
        }

        match progress {
            QuizProgress::Advanced(view) => self.send_question(chat_id, &view).await,
            QuizProgress::Completed(summary) => {
                tracing::info!(
                    user_id = %callback.user_id,
                    tie = summary.is_tie(),
                    "Quiz completed"
                );
                self.transport
                    .send_message(chat_id, &summary.to_string(), None)
                    .await
            }
            QuizProgress::Selecting(_) => Ok(()),
        }
    }

    async fn reject(&self, callback: &CallbackEvent, error: &QuizError) -> Result<(), TransportError> {
        tracing::debug!(
            user_id = %callback.user_id,
            code = %error.code(),
            "Action rejected"
        );
        self.transport
            .answer_callback(&callback.callback_id, Some(error.user_message().as_str()), true)
            .await
    }

    async fn send_question(&self, chat_id: i64, view: &QuestionView) -> Result<(), TransportError> {
        self.transport
            .send_message(chat_id, &view.text, Some(view.buttons().as_slice()))
            .await
    }
}
