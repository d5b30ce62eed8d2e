//! PostgreSQL implementation of the quest store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::QuestStore;
use super::models::{CacheRow, QuestRow, SubmissionRow, TaskRow, UserRow};
use crate::config::QuestConfig;
use crate::domain::{
    CacheEntry, CacheKey, LevelPolicy, Quest, QuestId, Settlement, Submission, SubmissionDraft,
    SubmissionStatus, Task, TaskId, User, UserId, WalletAddress,
};
use crate::error::QuestError;

/// PostgreSQL-backed store using `sqlx::PgPool`.
///
/// All mutations of the submission ledger and XP counters go through
/// [`QuestStore::settle_verification`], which runs in a single
/// transaction; XP credits are routed through the `increment_user_xp`
/// stored procedure.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
    level_policy: LevelPolicy,
}

impl PostgresStore {
    /// Creates a store with an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool, level_policy: LevelPolicy) -> Self {
        Self { pool, level_policy }
    }

    /// Connects to the database named in the configuration and applies
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Persistence`] when the pool cannot be built
    /// or a migration fails.
    pub async fn connect(config: &QuestConfig) -> Result<Self, QuestError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(std::time::Duration::from_secs(
                config.database_connect_timeout_secs,
            ))
            .connect(&config.database_url)
            .await
            .map_err(|e| QuestError::Persistence(format!("database connect failed: {e}")))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| QuestError::Persistence(format!("migration failed: {e}")))?;

        Ok(Self::new(pool, LevelPolicy::new(config.xp_per_level)))
    }
}

const USER_COLUMNS: &str = "id, wallet_address, email, username, total_xp, level, \
                            completed_quests, created_at, updated_at";
const TASK_COLUMNS: &str = "id, quest_id, title, task_type, xp_reward, order_index, \
                            social_platform, social_action, social_url, social_username, \
                            social_post_id, learn_questions, learn_passing_score, \
                            created_at, updated_at";
const QUEST_COLUMNS: &str = "id, project, title, description, total_xp, status, image_url, \
                             created_at, updated_at";
const SUBMISSION_COLUMNS: &str = "id, user_id, task_id, quest_id, status, submission_data, \
                                  verification_data, xp_earned, submitted_at, verified_at";

#[async_trait]
impl QuestStore for PostgresStore {
    async fn find_user_by_wallet(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<User>, QuestError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE wallet_address = $1"
        ))
        .bind(wallet.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| QuestError::Persistence(e.to_string()))?;

        Ok(row.map(User::from))
    }

    async fn upsert_user_by_wallet(&self, wallet: &WalletAddress) -> Result<User, QuestError> {
        // Defaults (XP 0, level 1, generated username) come from the
        // domain constructor; a conflicting insert returns the existing
        // row untouched apart from updated_at.
        let template = User::new_for_wallet(wallet.clone(), Utc::now());
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (wallet_address, username) VALUES ($1, $2) \
             ON CONFLICT (wallet_address) DO UPDATE SET updated_at = now() \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(wallet.as_str())
        .bind(template.username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| QuestError::Persistence(e.to_string()))?;

        Ok(User::from(row))
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, QuestError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| QuestError::Persistence(e.to_string()))?;

        Ok(row.map(User::from))
    }

    async fn list_active_quests(&self) -> Result<Vec<Quest>, QuestError> {
        let rows = sqlx::query_as::<_, QuestRow>(&format!(
            "SELECT {QUEST_COLUMNS} FROM quests WHERE status = 'active' ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| QuestError::Persistence(e.to_string()))?;

        Ok(rows.into_iter().map(Quest::from).collect())
    }

    async fn get_quest(&self, id: QuestId) -> Result<Option<Quest>, QuestError> {
        let row = sqlx::query_as::<_, QuestRow>(&format!(
            "SELECT {QUEST_COLUMNS} FROM quests WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| QuestError::Persistence(e.to_string()))?;

        Ok(row.map(Quest::from))
    }

    async fn list_quest_tasks(&self, quest_id: QuestId) -> Result<Vec<Task>, QuestError> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE quest_id = $1 ORDER BY order_index ASC"
        ))
        .bind(quest_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| QuestError::Persistence(e.to_string()))?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn get_task(&self, id: TaskId) -> Result<Option<Task>, QuestError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| QuestError::Persistence(e.to_string()))?;

        row.map(Task::try_from).transpose()
    }

    async fn get_submission(
        &self,
        user_id: UserId,
        task_id: TaskId,
    ) -> Result<Option<Submission>, QuestError> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM user_task_submissions \
             WHERE user_id = $1 AND task_id = $2"
        ))
        .bind(user_id.as_uuid())
        .bind(task_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| QuestError::Persistence(e.to_string()))?;

        row.map(Submission::try_from).transpose()
    }

    async fn settle_verification(
        &self,
        user: &User,
        task: &Task,
        draft: SubmissionDraft,
    ) -> Result<Settlement, QuestError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| QuestError::Persistence(e.to_string()))?;

        // Serialize settlements of the same (user, task) pair. A row
        // lock cannot do this for two concurrent first-time settlements,
        // since neither finds a row to lock and both would read
        // prior_status = None. The transaction-scoped advisory lock makes
        // the later transaction wait, then read the committed status.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1 || ':' || $2, 0))")
            .bind(user.id.to_string())
            .bind(task.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| QuestError::Persistence(e.to_string()))?;

        let prior_status: Option<String> = sqlx::query_scalar(
            "SELECT status FROM user_task_submissions WHERE user_id = $1 AND task_id = $2",
        )
        .bind(user.id.as_uuid())
        .bind(task.id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| QuestError::Persistence(e.to_string()))?;

        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "INSERT INTO user_task_submissions \
             (user_id, task_id, quest_id, status, submission_data, verification_data, \
              xp_earned, submitted_at, verified_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, now(), $8) \
             ON CONFLICT (user_id, task_id) DO UPDATE SET \
               status = EXCLUDED.status, \
               submission_data = EXCLUDED.submission_data, \
               verification_data = EXCLUDED.verification_data, \
               xp_earned = EXCLUDED.xp_earned, \
               submitted_at = now(), \
               verified_at = EXCLUDED.verified_at \
             RETURNING {SUBMISSION_COLUMNS}"
        ))
        .bind(user.id.as_uuid())
        .bind(task.id.as_uuid())
        .bind(task.quest_id.as_uuid())
        .bind(draft.status.as_str())
        .bind(&draft.submission_data)
        .bind(&draft.verification_data)
        .bind(i32::try_from(draft.xp_earned).unwrap_or(i32::MAX))
        .bind(draft.verified_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| QuestError::Persistence(e.to_string()))?;

        let first_transition = draft.status == SubmissionStatus::Verified
            && prior_status.as_deref() != Some(SubmissionStatus::Verified.as_str());

        let credit_wallet = if first_transition && draft.xp_earned > 0 {
            user.wallet_address.as_ref()
        } else {
            None
        };

        let mut xp_credited = 0;
        let (total_xp, level) = if let Some(wallet) = credit_wallet {
            // XP credits go through the stored procedure, never a direct
            // column update. Level is recomputed from the returned total
            // by the explicit policy.
            let new_total: Option<i64> = sqlx::query_scalar("SELECT increment_user_xp($1, $2)")
                .bind(wallet.as_str())
                .bind(i32::try_from(draft.xp_earned).unwrap_or(i32::MAX))
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| QuestError::Persistence(e.to_string()))?;
            let new_total = new_total.ok_or_else(|| {
                QuestError::Persistence(format!("xp credit matched no user for wallet {wallet}"))
            })?;

            let total = u64::try_from(new_total).unwrap_or(0);
            let level = self.level_policy.level_for(total);
            sqlx::query("UPDATE users SET level = $2, updated_at = now() WHERE id = $1")
                .bind(user.id.as_uuid())
                .bind(i32::try_from(level).unwrap_or(i32::MAX))
                .execute(&mut *tx)
                .await
                .map_err(|e| QuestError::Persistence(e.to_string()))?;

            xp_credited = draft.xp_earned;
            (total, level)
        } else {
            let (total, level): (i64, i32) =
                sqlx::query_as("SELECT total_xp, level FROM users WHERE id = $1")
                    .bind(user.id.as_uuid())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| QuestError::Persistence(e.to_string()))?;
            (
                u64::try_from(total).unwrap_or(0),
                u32::try_from(level).unwrap_or(1),
            )
        };

        // A first verified transition may have completed the quest.
        let mut quest_completed = false;
        if first_transition {
            let (task_count, verified_count): (i64, i64) = sqlx::query_as(
                "SELECT \
                   (SELECT count(*) FROM tasks WHERE quest_id = $2), \
                   (SELECT count(*) FROM user_task_submissions \
                     WHERE user_id = $1 AND quest_id = $2 AND status = 'verified')",
            )
            .bind(user.id.as_uuid())
            .bind(task.quest_id.as_uuid())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| QuestError::Persistence(e.to_string()))?;

            if task_count > 0 && verified_count == task_count {
                sqlx::query(
                    "UPDATE users SET completed_quests = completed_quests + 1, \
                     updated_at = now() WHERE id = $1",
                )
                .bind(user.id.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| QuestError::Persistence(e.to_string()))?;
                quest_completed = true;
            }
        }

        tx.commit()
            .await
            .map_err(|e| QuestError::Persistence(e.to_string()))?;

        Ok(Settlement {
            submission: Submission::try_from(row)?,
            xp_credited,
            total_xp,
            level,
            quest_completed,
        })
    }

    async fn cache_lookup(
        &self,
        user_id: UserId,
        key: &CacheKey,
        now: DateTime<Utc>,
    ) -> Result<Option<CacheEntry>, QuestError> {
        // Expiry is enforced on read; stale rows stay until overwritten.
        let row = sqlx::query_as::<_, CacheRow>(
            "SELECT verified, verification_data, expires_at FROM social_verification_cache \
             WHERE user_id = $1 AND platform = $2 AND action = $3 AND target_id = $4 \
               AND expires_at > $5",
        )
        .bind(user_id.as_uuid())
        .bind(key.platform.as_str())
        .bind(key.action.as_str())
        .bind(&key.target_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| QuestError::Persistence(e.to_string()))?;

        Ok(row.map(|r| CacheEntry {
            verified: r.verified,
            verification_data: r.verification_data,
            expires_at: r.expires_at,
        }))
    }

    async fn cache_store(
        &self,
        user_id: UserId,
        key: &CacheKey,
        entry: &CacheEntry,
    ) -> Result<(), QuestError> {
        sqlx::query(
            "INSERT INTO social_verification_cache \
             (user_id, platform, action, target_id, verified, verification_data, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (user_id, platform, action, target_id) DO UPDATE SET \
               verified = EXCLUDED.verified, \
               verification_data = EXCLUDED.verification_data, \
               expires_at = EXCLUDED.expires_at",
        )
        .bind(user_id.as_uuid())
        .bind(key.platform.as_str())
        .bind(key.action.as_str())
        .bind(&key.target_id)
        .bind(entry.verified)
        .bind(&entry.verification_data)
        .bind(entry.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| QuestError::Persistence(e.to_string()))?;

        Ok(())
    }
}
