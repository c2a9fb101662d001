//! In-Memory Session Store Adapter
//!
//! Keeps quiz sessions in process memory. Sessions do not survive a
//! restart, which matches the bot's lifecycle: a restarted bot asks
//! users to `/start` again.
//!
//! Each user owns a slot guarded by its own mutex, so updates for one
//! user are serialized while different users proceed in parallel. The
//! outer map lock is only held long enough to look a slot up.
//!
//! A slot is dropped from the map once its session ends and no other
//! task still holds it, so the map only tracks users with a live quiz
//! or an action in flight.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::UserId;
use crate::domain::quiz::{QuizError, QuizSession, Transition};
use crate::ports::{SessionStep, SessionStore};

type Slot = Arc<Mutex<Option<QuizSession>>>;

/// In-memory storage for quiz sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    slots: Arc<RwLock<HashMap<UserId, Slot>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of users with a quiz in progress
    pub async fn active_count(&self) -> usize {
        let slots: Vec<Slot> = self.slots.read().await.values().cloned().collect();
        let mut count = 0;
        for slot in slots {
            if slot.lock().await.is_some() {
                count += 1;
            }
        }
        count
    }

    async fn existing_slot(&self, user_id: UserId) -> Option<Slot> {
        self.slots.read().await.get(&user_id).cloned()
    }

    async fn slot(&self, user_id: UserId) -> Slot {
        if let Some(slot) = self.existing_slot(user_id).await {
            return slot;
        }
        self.slots
            .write()
            .await
            .entry(user_id)
            .or_default()
            .clone()
    }

    /// Removes the slot of `user_id` if it is empty and unreferenced.
    async fn prune(&self, user_id: UserId) {
        let mut slots = self.slots.write().await;
        let idle = match slots.get(&user_id) {
            // With the write lock held nobody can clone the slot, so a
            // strong count of one means the map is the last owner.
            Some(slot) if Arc::strong_count(slot) == 1 => slot
                .try_lock()
                .map(|session| session.is_none())
                .unwrap_or(false),
            _ => false,
        };
        if idle {
            slots.remove(&user_id);
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn start(&self, user_id: UserId, session: QuizSession) {
        let slot = self.slot(user_id).await;
        *slot.lock().await = Some(session);
    }

    async fn get(&self, user_id: UserId) -> Result<QuizSession, QuizError> {
        let slot = self.existing_slot(user_id).await.ok_or(QuizError::NotFound)?;
        let guard = slot.lock().await;
        guard.clone().ok_or(QuizError::NotFound)
    }

    async fn update(&self, user_id: UserId, step: SessionStep) -> Result<Transition, QuizError> {
        let slot = self.existing_slot(user_id).await.ok_or(QuizError::NotFound)?;
        let mut guard = slot.lock().await;
        let current = guard.as_ref().ok_or(QuizError::NotFound)?;

        let transition = step(current)?;
        *guard = transition.session().cloned();
        let finished = guard.is_none();
        drop(guard);
        drop(slot);

        if finished {
            self.prune(user_id).await;
        }
        Ok(transition)
    }

    async fn clear(&self, user_id: UserId) -> bool {
        let Some(slot) = self.existing_slot(user_id).await else {
            return false;
        };
        let had_session = slot.lock().await.take().is_some();
        drop(slot);

        self.prune(user_id).await;
        had_session
    }
}
