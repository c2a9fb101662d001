//! Session store port.
//!
//! The store is the only mutable state shared between concurrent actions.
//! Its `update` is the synchronization boundary: a step runs while the
//! user's slot is held, so two actions of the same user never interleave.
//! Different users never contend with each other.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::quiz::{QuizError, QuizSession, Transition};

/// A pure state step: current session in, next transition out.
pub type SessionStep = Box<dyn FnOnce(&QuizSession) -> Result<Transition, QuizError> + Send>;

/// Port for per-user quiz session storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores `session` for `user_id`, replacing any session in progress.
    async fn start(&self, user_id: UserId, session: QuizSession);

    /// Returns a copy of the user's session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user has no active quiz
    async fn get(&self, user_id: UserId) -> Result<QuizSession, QuizError>;

    /// Runs `step` against the user's session and stores its outcome.
    ///
    /// A `Completed` transition removes the session. If `step` fails the
    /// stored session is left untouched and the error is returned.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the user has no active quiz
    /// - whatever `step` returns
    async fn update(&self, user_id: UserId, step: SessionStep) -> Result<Transition, QuizError>;

    /// Removes the user's session. Returns whether one existed.
    async fn clear(&self, user_id: UserId) -> bool;
}
