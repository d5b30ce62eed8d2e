//! Task catalog types.
//!
//! A task is a single completable unit within a quest. The `task_type`
//! column selects the verification strategy; type-specific payload lives
//! in the nullable `social_*` / `learn_*` columns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{QuestId, TaskId};

/// Verification strategy discriminator for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Social-platform action (follow, like, retweet).
    Social,
    /// Quiz with configured correct answers.
    Learn,
    /// Discord guild membership.
    Discord,
    /// Telegram group membership.
    Telegram,
    /// Trusted self-report (download, visit, form submission).
    Manual,
}

impl TaskKind {
    /// Returns the canonical column value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Social => "social",
            Self::Learn => "learn",
            Self::Discord => "discord",
            Self::Telegram => "telegram",
            Self::Manual => "manual",
        }
    }

    /// Parses a stored `task_type` value. The legacy `download`, `form`,
    /// and `visit` types are all trusted self-reports and map to
    /// [`TaskKind::Manual`].
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "social" => Some(Self::Social),
            "learn" => Some(Self::Learn),
            "discord" => Some(Self::Discord),
            "telegram" => Some(Self::Telegram),
            "manual" | "download" | "form" | "visit" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// Social platform a social task targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    /// X / Twitter.
    Twitter,
    /// Discord.
    Discord,
    /// Telegram.
    Telegram,
}

impl SocialPlatform {
    /// Returns the canonical column value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Discord => "discord",
            Self::Telegram => "telegram",
        }
    }
}

/// The concrete action a social task asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialAction {
    /// Follow an account.
    Follow,
    /// Like a post.
    Like,
    /// Retweet / repost a post.
    Retweet,
    /// Join a group or guild.
    Join,
}

impl SocialAction {
    /// Returns the canonical column value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Like => "like",
            Self::Retweet => "retweet",
            Self::Join => "join",
        }
    }

    /// Parses a stored `social_action` value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "follow" => Some(Self::Follow),
            "like" => Some(Self::Like),
            "retweet" => Some(Self::Retweet),
            "join" => Some(Self::Join),
            _ => None,
        }
    }
}

/// A single completable unit within a quest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Task identifier.
    pub id: TaskId,
    /// Parent quest.
    pub quest_id: QuestId,
    /// Display title.
    pub title: String,
    /// Verification strategy.
    pub kind: TaskKind,
    /// XP awarded on verification.
    pub xp_reward: u32,
    /// Position within the quest's task list.
    pub order_index: i32,
    /// Platform for social tasks.
    pub social_platform: Option<SocialPlatform>,
    /// Action for social tasks.
    pub social_action: Option<SocialAction>,
    /// Target URL (group invite link, post URL).
    pub social_url: Option<String>,
    /// Target account handle for follow tasks.
    pub social_username: Option<String>,
    /// Target post ID for like/retweet tasks.
    pub social_post_id: Option<String>,
    /// Quiz configuration (correct answers, multi-select flag).
    pub learn_questions: Option<serde_json::Value>,
    /// Minimum score (percent) to pass the quiz. Defaults to 80.
    pub learn_passing_score: Option<u32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// The cache/verification target for a social task: the account
    /// handle for follows, the post ID for likes and retweets.
    #[must_use]
    pub fn social_target(&self) -> Option<&str> {
        match self.social_action? {
            SocialAction::Follow => self.social_username.as_deref(),
            SocialAction::Like | SocialAction::Retweet => self.social_post_id.as_deref(),
            SocialAction::Join => self.social_url.as_deref(),
        }
    }

    /// Data-quality check on the type-specific payload: follow and
    /// retweet tasks require a target username, like and retweet tasks
    /// require a target post ID.
    ///
    /// # Errors
    ///
    /// Returns a description of the first missing field.
    pub fn validate(&self) -> Result<(), String> {
        match self.social_action {
            Some(SocialAction::Follow) if self.social_username.is_none() => {
                Err("follow task has no target username".to_string())
            }
            Some(SocialAction::Retweet)
                if self.social_username.is_none() || self.social_post_id.is_none() =>
            {
                Err("retweet task needs a target username and post id".to_string())
            }
            Some(SocialAction::Like) if self.social_post_id.is_none() => {
                Err("like task has no target post id".to_string())
            }
            _ => Ok(()),
        }
    }
}
