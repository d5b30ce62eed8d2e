//! Database row models and conversions into domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Quest, QuestId, QuestStatus, SocialAction, SocialPlatform, Submission, SubmissionStatus, Task,
    TaskId, TaskKind, User, UserId, WalletAddress,
};
use crate::error::QuestError;

/// A row from the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRow {
    /// Primary key.
    pub id: Uuid,
    /// Normalized wallet address, unique when present.
    pub wallet_address: Option<String>,
    /// Email, unique when present.
    pub email: Option<String>,
    /// Display name.
    pub username: Option<String>,
    /// Cumulative XP.
    pub total_xp: i64,
    /// Level derived from XP.
    pub level: i32,
    /// Fully completed quests.
    pub completed_quests: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            wallet_address: row.wallet_address.as_deref().map(WalletAddress::new),
            email: row.email,
            username: row.username,
            total_xp: u64::try_from(row.total_xp).unwrap_or(0),
            level: u32::try_from(row.level).unwrap_or(1),
            completed_quests: u32::try_from(row.completed_quests).unwrap_or(0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A row from the `quests` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuestRow {
    /// Primary key.
    pub id: Uuid,
    /// Owning project name.
    pub project: String,
    /// Display title.
    pub title: String,
    /// Quest description.
    pub description: String,
    /// Total XP pool.
    pub total_xp: i64,
    /// Publication state string.
    pub status: String,
    /// Cover image URL.
    pub image_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<QuestRow> for Quest {
    fn from(row: QuestRow) -> Self {
        Self {
            id: QuestId::from_uuid(row.id),
            project: row.project,
            title: row.title,
            description: row.description,
            total_xp: u64::try_from(row.total_xp).unwrap_or(0),
            status: QuestStatus::parse(&row.status),
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A row from the `tasks` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskRow {
    /// Primary key.
    pub id: Uuid,
    /// Parent quest.
    pub quest_id: Uuid,
    /// Display title.
    pub title: String,
    /// Verification strategy string.
    pub task_type: String,
    /// XP awarded on verification.
    pub xp_reward: i32,
    /// Position within the quest.
    pub order_index: i32,
    /// Social platform string.
    pub social_platform: Option<String>,
    /// Social action string.
    pub social_action: Option<String>,
    /// Target URL.
    pub social_url: Option<String>,
    /// Target account handle.
    pub social_username: Option<String>,
    /// Target post ID.
    pub social_post_id: Option<String>,
    /// Quiz configuration.
    pub learn_questions: Option<serde_json::Value>,
    /// Quiz passing score.
    pub learn_passing_score: Option<i32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = QuestError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let kind = TaskKind::parse(&row.task_type).ok_or_else(|| {
            QuestError::Persistence(format!(
                "task {} has unknown task_type {:?}",
                row.id, row.task_type
            ))
        })?;
        let social_platform = match row.social_platform.as_deref() {
            None => None,
            Some("twitter") | Some("x") => Some(SocialPlatform::Twitter),
            Some("discord") => Some(SocialPlatform::Discord),
            Some("telegram") => Some(SocialPlatform::Telegram),
            Some(other) => {
                return Err(QuestError::Persistence(format!(
                    "task {} has unknown social_platform {other:?}",
                    row.id
                )));
            }
        };
        let social_action = row
            .social_action
            .as_deref()
            .map(|value| {
                SocialAction::parse(value).ok_or_else(|| {
                    QuestError::Persistence(format!(
                        "task {} has unknown social_action {value:?}",
                        row.id
                    ))
                })
            })
            .transpose()?;

        Ok(Self {
            id: TaskId::from_uuid(row.id),
            quest_id: QuestId::from_uuid(row.quest_id),
            title: row.title,
            kind,
            xp_reward: u32::try_from(row.xp_reward).unwrap_or(0),
            order_index: row.order_index,
            social_platform,
            social_action,
            social_url: row.social_url,
            social_username: row.social_username,
            social_post_id: row.social_post_id,
            learn_questions: row.learn_questions,
            learn_passing_score: row.learn_passing_score.map(|s| u32::try_from(s).unwrap_or(0)),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A row from the `user_task_submissions` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SubmissionRow {
    /// Primary key.
    pub id: Uuid,
    /// Submitting user.
    pub user_id: Uuid,
    /// Task attempted.
    pub task_id: Uuid,
    /// Quest the task belongs to.
    pub quest_id: Uuid,
    /// Outcome status string.
    pub status: String,
    /// Attempt payload.
    pub submission_data: serde_json::Value,
    /// Verification metadata.
    pub verification_data: serde_json::Value,
    /// XP recorded on the row.
    pub xp_earned: i32,
    /// When the attempt was recorded.
    pub submitted_at: DateTime<Utc>,
    /// When verification succeeded.
    pub verified_at: Option<DateTime<Utc>>,
}

impl TryFrom<SubmissionRow> for Submission {
    type Error = QuestError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        let status = SubmissionStatus::parse(&row.status).ok_or_else(|| {
            QuestError::Persistence(format!(
                "submission {} has unknown status {:?}",
                row.id, row.status
            ))
        })?;
        Ok(Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            task_id: TaskId::from_uuid(row.task_id),
            quest_id: QuestId::from_uuid(row.quest_id),
            status,
            submission_data: row.submission_data,
            verification_data: row.verification_data,
            xp_earned: u32::try_from(row.xp_earned).unwrap_or(0),
            submitted_at: row.submitted_at,
            verified_at: row.verified_at,
        })
    }
}

/// A row from the `social_verification_cache` table (value columns only;
/// the natural key is carried by the query).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CacheRow {
    /// Memoized verdict.
    pub verified: bool,
    /// Metadata recorded at check time.
    pub verification_data: serde_json::Value,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
}
