//! Persistence layer: the [`QuestStore`] trait and its PostgreSQL
//! implementation.
//!
//! The store owns all authoritative state — the application keeps
//! nothing in memory between requests. [`QuestStore`] is a trait so the
//! verification engine can be exercised against an in-memory store in
//! tests; production always runs [`postgres::PostgresStore`].

pub mod models;
pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    CacheEntry, CacheKey, Quest, QuestId, Settlement, Submission, SubmissionDraft, Task, TaskId,
    User, UserId, WalletAddress,
};
use crate::error::QuestError;

/// Relational store for users, the quest/task catalog, the submission
/// ledger, and the verification cache.
#[async_trait]
pub trait QuestStore: Send + Sync + std::fmt::Debug {
    /// Looks up a user by normalized wallet address.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Persistence`] on store failure.
    async fn find_user_by_wallet(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<User>, QuestError>;

    /// Returns the user for a wallet, creating the row with ledger
    /// defaults (XP 0, level 1) on first sight. A conflicting concurrent
    /// insert resolves to the existing row, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Persistence`] on store failure.
    async fn upsert_user_by_wallet(&self, wallet: &WalletAddress) -> Result<User, QuestError>;

    /// Looks up a user by ID.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Persistence`] on store failure.
    async fn get_user(&self, id: UserId) -> Result<Option<User>, QuestError>;

    /// Lists quests with status `active`.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Persistence`] on store failure.
    async fn list_active_quests(&self) -> Result<Vec<Quest>, QuestError>;

    /// Looks up a quest by ID.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Persistence`] on store failure.
    async fn get_quest(&self, id: QuestId) -> Result<Option<Quest>, QuestError>;

    /// Lists a quest's tasks ordered by `order_index`.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Persistence`] on store failure.
    async fn list_quest_tasks(&self, quest_id: QuestId) -> Result<Vec<Task>, QuestError>;

    /// Looks up a task by ID.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Persistence`] on store failure.
    async fn get_task(&self, id: TaskId) -> Result<Option<Task>, QuestError>;

    /// Returns the submission row for a (user, task) pair, if any.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Persistence`] on store failure.
    async fn get_submission(
        &self,
        user_id: UserId,
        task_id: TaskId,
    ) -> Result<Option<Submission>, QuestError>;

    /// Atomically settles a verification attempt: upserts the
    /// (user, task) submission row with the draft's fields and, when the
    /// row transitions into `verified` for the first time, credits the
    /// draft's XP through the ledger and recomputes the user's level.
    /// Re-settling an already-verified pair overwrites the row but
    /// credits nothing.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Persistence`] on store failure.
    async fn settle_verification(
        &self,
        user: &User,
        task: &Task,
        draft: SubmissionDraft,
    ) -> Result<Settlement, QuestError>;

    /// Returns the cache entry for (user, key) if present and still
    /// fresh at `now`. An expired row is a miss.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Persistence`] on store failure.
    async fn cache_lookup(
        &self,
        user_id: UserId,
        key: &CacheKey,
        now: DateTime<Utc>,
    ) -> Result<Option<CacheEntry>, QuestError>;

    /// Upserts a cache entry on its natural key.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Persistence`] on store failure.
    async fn cache_store(
        &self,
        user_id: UserId,
        key: &CacheKey,
        entry: &CacheEntry,
    ) -> Result<(), QuestError>;
}
