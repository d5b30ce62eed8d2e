//! Verification endpoint DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::verification::{DiscordOutcome, VerifyOutcome};

/// Request body for `POST /verify/manual-completion`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManualCompletionRequest {
    /// Wallet of the submitting user.
    pub user_wallet: String,
    /// Task to settle.
    pub task_id: uuid::Uuid,
    /// Optional free-form payload recorded with the submission.
    #[serde(default)]
    pub submission_data: Option<serde_json::Value>,
}

/// Request body for `POST /verify/twitter-follow`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TwitterFollowRequest {
    /// Wallet of the submitting user.
    pub user_wallet: String,
    /// The user's Twitter handle.
    pub username: String,
    /// Task to verify.
    pub task_id: uuid::Uuid,
}

/// Request body for `POST /verify/twitter-like`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TwitterLikeRequest {
    /// Wallet of the submitting user.
    pub user_wallet: String,
    /// The user's Twitter handle.
    pub username: String,
    /// Post ID the client believes it liked. Informational only; the
    /// check runs against the post stored on the task.
    #[serde(default)]
    pub post_id: Option<String>,
    /// Task to verify.
    pub task_id: uuid::Uuid,
}

/// Request body for `POST /verify/learn-completion` (bearer-authorized).
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LearnCompletionRequest {
    /// Quiz task to grade.
    pub task_id: uuid::Uuid,
    /// Selected answer indices.
    pub answers: Vec<usize>,
}

/// Request body for `POST /verify/discord-join`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscordJoinRequest {
    /// Discord OAuth authorization code.
    pub code: String,
    /// Guild the task requires membership of.
    pub guild_id: String,
    /// Task to settle.
    pub task_id: uuid::Uuid,
    /// Wallet of the submitting user, when already connected.
    #[serde(default)]
    pub user_wallet: Option<String>,
}

/// Request body for `POST /verify/telegram-join`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TelegramJoinRequest {
    /// Wallet of the submitting user.
    pub user_wallet: String,
    /// Task to settle.
    pub task_id: uuid::Uuid,
    /// Signed Telegram login-widget payload.
    pub telegram_data: serde_json::Map<String, serde_json::Value>,
}

/// Response body shared by the verification endpoints.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    /// Whether the task is now verified.
    pub verified: bool,
    /// Outcome message for display.
    pub message: String,
    /// XP the task awards when verified.
    pub xp_earned: u32,
    /// Whether the verdict came from the verification cache.
    pub cached: bool,
    /// Quiz score in percent, for quiz verifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl From<VerifyOutcome> for VerifyResponse {
    fn from(outcome: VerifyOutcome) -> Self {
        Self {
            verified: outcome.verified,
            message: outcome.message,
            xp_earned: outcome.xp_earned,
            cached: outcome.cached,
            score: outcome.score,
        }
    }
}

/// Response body for `POST /verify/discord-join`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscordJoinResponse {
    /// Whether the OAuth user is a member of the guild.
    pub is_member: bool,
    /// Whether the task was settled as verified.
    pub verified: bool,
    /// XP the task awards when verified.
    pub xp_earned: u32,
}

impl From<DiscordOutcome> for DiscordJoinResponse {
    fn from(outcome: DiscordOutcome) -> Self {
        Self {
            is_member: outcome.is_member,
            verified: outcome.verified,
            xp_earned: outcome.xp_earned,
        }
    }
}
