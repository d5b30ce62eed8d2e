//! Submission ledger types.
//!
//! One outcome row exists per (user, task) pair; a later verification
//! attempt overwrites the earlier row rather than appending history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ids::{QuestId, TaskId, UserId};

/// Lifecycle state of a submission row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Attempted but not yet decided.
    Pending,
    /// Verification passed; XP was earned.
    Verified,
    /// Verification failed.
    Rejected,
}

impl SubmissionStatus {
    /// Returns the canonical column value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a stored `status` value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// How a submission was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    /// Social platform API check (real or simulated).
    TwitterApi,
    /// Quiz answer comparison.
    Quiz,
    /// Trusted self-report.
    Manual,
    /// Discord OAuth guild-membership check.
    DiscordOauth,
    /// Telegram login widget plus membership check.
    TelegramLoginWidget,
}

impl VerificationMethod {
    /// Returns the value recorded in `verification_data.method`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TwitterApi => "twitter_api",
            Self::Quiz => "quiz",
            Self::Manual => "manual",
            Self::DiscordOauth => "discord_oauth",
            Self::TelegramLoginWidget => "telegram_login_widget",
        }
    }
}

/// A persisted submission row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Row identifier.
    pub id: Uuid,
    /// Submitting user.
    pub user_id: UserId,
    /// Task attempted.
    pub task_id: TaskId,
    /// Quest the task belongs to (denormalized for dashboard queries).
    pub quest_id: QuestId,
    /// Outcome status.
    pub status: SubmissionStatus,
    /// Free-form, type-specific payload supplied with the attempt.
    pub submission_data: serde_json::Value,
    /// Verification metadata (method, score, timestamps).
    pub verification_data: serde_json::Value,
    /// XP recorded on this row; 0 unless verified.
    pub xp_earned: u32,
    /// When this attempt was recorded.
    pub submitted_at: DateTime<Utc>,
    /// When verification succeeded, if it did.
    pub verified_at: Option<DateTime<Utc>>,
}

/// The fields the verification engine writes when settling an attempt.
#[derive(Debug, Clone)]
pub struct SubmissionDraft {
    /// Outcome status to record.
    pub status: SubmissionStatus,
    /// Attempt payload.
    pub submission_data: serde_json::Value,
    /// Verification metadata.
    pub verification_data: serde_json::Value,
    /// XP to record on the row; 0 unless verified.
    pub xp_earned: u32,
    /// Verification timestamp for verified drafts.
    pub verified_at: Option<DateTime<Utc>>,
}

impl SubmissionDraft {
    /// Builds a verified draft carrying the task's full XP reward.
    #[must_use]
    pub fn verified(
        method: VerificationMethod,
        submission_data: serde_json::Value,
        xp_reward: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            status: SubmissionStatus::Verified,
            submission_data,
            verification_data: serde_json::json!({
                "method": method.as_str(),
                "verified": true,
                "verified_at": now,
            }),
            xp_earned: xp_reward,
            verified_at: Some(now),
        }
    }

    /// Builds a rejected draft with zero XP.
    #[must_use]
    pub fn rejected(
        method: VerificationMethod,
        submission_data: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            status: SubmissionStatus::Rejected,
            submission_data,
            verification_data: serde_json::json!({
                "method": method.as_str(),
                "verified": false,
                "checked_at": now,
            }),
            xp_earned: 0,
            verified_at: None,
        }
    }
}

/// Result of atomically settling a verification attempt: the written
/// submission row plus the ledger effects of this particular call.
#[derive(Debug, Clone)]
pub struct Settlement {
    /// The submission row after the upsert.
    pub submission: Submission,
    /// XP actually credited by this call. Zero when the row was already
    /// verified (idempotent re-verification) or the draft was not
    /// verified.
    pub xp_credited: u32,
    /// The user's XP total after this call.
    pub total_xp: u64,
    /// The user's level after this call.
    pub level: u32,
    /// Whether this settlement completed the whole quest for the user.
    pub quest_completed: bool,
}
