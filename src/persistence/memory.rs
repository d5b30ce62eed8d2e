//! In-memory [`QuestStore`] used by service tests.
//!
//! Mirrors the PostgreSQL store's settlement semantics (one submission
//! row per (user, task), XP credited only on the first transition into
//! `verified`) without needing a database.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::QuestStore;
use crate::domain::{
    CacheEntry, CacheKey, LevelPolicy, Quest, QuestId, QuestStatus, Settlement, SocialAction,
    SocialPlatform, Submission, SubmissionDraft, SubmissionStatus, Task, TaskId, User, UserId,
    WalletAddress,
};
use crate::error::QuestError;

type CacheMapKey = (UserId, SocialPlatform, SocialAction, String);

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<UserId, User>,
    wallets: HashMap<String, UserId>,
    quests: HashMap<QuestId, Quest>,
    tasks: HashMap<TaskId, Task>,
    submissions: HashMap<(UserId, TaskId), Submission>,
    cache: HashMap<CacheMapKey, CacheEntry>,
}

/// Test double for [`QuestStore`] backed by hash maps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    level_policy: LevelPolicy,
}

impl MemoryStore {
    /// Creates an empty store with the default level policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a quest.
    pub async fn add_quest(&self, quest: Quest) {
        self.inner.lock().await.quests.insert(quest.id, quest);
    }

    /// Seeds a task. The parent quest does not have to exist.
    pub async fn add_task(&self, task: Task) {
        self.inner.lock().await.tasks.insert(task.id, task);
    }

    /// Seeds a user, indexing its wallet when present.
    pub async fn add_user(&self, user: User) {
        let mut inner = self.inner.lock().await;
        if let Some(wallet) = &user.wallet_address {
            inner.wallets.insert(wallet.as_str().to_string(), user.id);
        }
        inner.users.insert(user.id, user);
    }

    /// Convenience: seeds an `active` quest with one task and a wallet
    /// user, returning them for use in assertions.
    pub async fn seed_quest_with_task(&self, task: Task, wallet: &str) -> (Quest, User) {
        let now = Utc::now();
        let quest = Quest {
            id: task.quest_id,
            project: "questhub".to_string(),
            title: "Onboarding".to_string(),
            description: "Getting started".to_string(),
            total_xp: u64::from(task.xp_reward),
            status: QuestStatus::Active,
            image_url: None,
            created_at: now,
            updated_at: now,
        };
        let user = User::new_for_wallet(WalletAddress::new(wallet), now);
        self.add_quest(quest.clone()).await;
        self.add_task(task).await;
        self.add_user(user.clone()).await;
        (quest, user)
    }
}

#[async_trait]
impl QuestStore for MemoryStore {
    async fn find_user_by_wallet(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<User>, QuestError> {
        let inner = self.inner.lock().await;
        let id = inner.wallets.get(wallet.as_str());
        Ok(id.and_then(|id| inner.users.get(id)).cloned())
    }

    async fn upsert_user_by_wallet(&self, wallet: &WalletAddress) -> Result<User, QuestError> {
        let mut inner = self.inner.lock().await;
        if let Some(id) = inner.wallets.get(wallet.as_str()).copied() {
            if let Some(user) = inner.users.get(&id) {
                return Ok(user.clone());
            }
        }
        let user = User::new_for_wallet(wallet.clone(), Utc::now());
        inner.wallets.insert(wallet.as_str().to_string(), user.id);
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, QuestError> {
        Ok(self.inner.lock().await.users.get(&id).cloned())
    }

    async fn list_active_quests(&self) -> Result<Vec<Quest>, QuestError> {
        let inner = self.inner.lock().await;
        let mut quests: Vec<Quest> = inner
            .quests
            .values()
            .filter(|q| q.status == QuestStatus::Active)
            .cloned()
            .collect();
        quests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quests)
    }

    async fn get_quest(&self, id: QuestId) -> Result<Option<Quest>, QuestError> {
        Ok(self.inner.lock().await.quests.get(&id).cloned())
    }

    async fn list_quest_tasks(&self, quest_id: QuestId) -> Result<Vec<Task>, QuestError> {
        let inner = self.inner.lock().await;
        let mut tasks: Vec<Task> = inner
            .tasks
            .values()
            .filter(|t| t.quest_id == quest_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.order_index);
        Ok(tasks)
    }

    async fn get_task(&self, id: TaskId) -> Result<Option<Task>, QuestError> {
        Ok(self.inner.lock().await.tasks.get(&id).cloned())
    }

    async fn get_submission(
        &self,
        user_id: UserId,
        task_id: TaskId,
    ) -> Result<Option<Submission>, QuestError> {
        Ok(self
            .inner
            .lock()
            .await
            .submissions
            .get(&(user_id, task_id))
            .cloned())
    }

    async fn settle_verification(
        &self,
        user: &User,
        task: &Task,
        draft: SubmissionDraft,
    ) -> Result<Settlement, QuestError> {
        let mut inner = self.inner.lock().await;
        let key = (user.id, task.id);

        let prior_status = inner.submissions.get(&key).map(|s| s.status);
        let first_transition = draft.status == SubmissionStatus::Verified
            && prior_status != Some(SubmissionStatus::Verified);

        let now = Utc::now();
        let id = inner.submissions.get(&key).map_or_else(Uuid::new_v4, |s| s.id);
        let submission = Submission {
            id,
            user_id: user.id,
            task_id: task.id,
            quest_id: task.quest_id,
            status: draft.status,
            submission_data: draft.submission_data,
            verification_data: draft.verification_data,
            xp_earned: draft.xp_earned,
            submitted_at: now,
            verified_at: draft.verified_at,
        };
        inner.submissions.insert(key, submission.clone());

        let mut xp_credited = 0;
        {
            let stored = inner
                .users
                .get_mut(&user.id)
                .ok_or_else(|| QuestError::Persistence("user not seeded".to_string()))?;
            if first_transition && draft.xp_earned > 0 && stored.wallet_address.is_some() {
                stored.total_xp += u64::from(draft.xp_earned);
                stored.level = self.level_policy.level_for(stored.total_xp);
                stored.updated_at = now;
                xp_credited = draft.xp_earned;
            }
        }

        let mut quest_completed = false;
        if first_transition {
            let task_count = inner
                .tasks
                .values()
                .filter(|t| t.quest_id == task.quest_id)
                .count();
            let verified_count = inner
                .submissions
                .values()
                .filter(|s| {
                    s.user_id == user.id
                        && s.quest_id == task.quest_id
                        && s.status == SubmissionStatus::Verified
                })
                .count();
            if task_count > 0 && verified_count == task_count {
                let stored = inner
                    .users
                    .get_mut(&user.id)
                    .ok_or_else(|| QuestError::Persistence("user not seeded".to_string()))?;
                stored.completed_quests += 1;
                stored.updated_at = now;
                quest_completed = true;
            }
        }

        let stored = inner
            .users
            .get(&user.id)
            .ok_or_else(|| QuestError::Persistence("user not seeded".to_string()))?;

        Ok(Settlement {
            submission,
            xp_credited,
            total_xp: stored.total_xp,
            level: stored.level,
            quest_completed,
        })
    }

    async fn cache_lookup(
        &self,
        user_id: UserId,
        key: &CacheKey,
        now: DateTime<Utc>,
    ) -> Result<Option<CacheEntry>, QuestError> {
        let inner = self.inner.lock().await;
        let entry = inner
            .cache
            .get(&(user_id, key.platform, key.action, key.target_id.clone()));
        Ok(entry.filter(|e| e.is_fresh(now)).cloned())
    }

    async fn cache_store(
        &self,
        user_id: UserId,
        key: &CacheKey,
        entry: &CacheEntry,
    ) -> Result<(), QuestError> {
        self.inner.lock().await.cache.insert(
            (user_id, key.platform, key.action, key.target_id.clone()),
            entry.clone(),
        );
        Ok(())
    }
}
