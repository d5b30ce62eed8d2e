//! Verification providers.
//!
//! [`SocialProvider`] is the seam between the verification engine and
//! the outside world. Production runs [`LiveProvider`] against the real
//! platform APIs; environments without credentials run
//! [`SimulatedProvider`]. The two are never mixed — the mode is chosen
//! once from configuration at startup.

pub mod live;
pub mod simulated;
pub mod telegram;

use async_trait::async_trait;

pub use live::LiveProvider;
pub use simulated::SimulatedProvider;

use crate::domain::{SocialAction, SocialPlatform};
use crate::error::QuestError;

/// One social-platform check: did `user_handle` perform `action` on
/// `target_id`?
#[derive(Debug, Clone)]
pub struct SocialCheck {
    /// Platform to query.
    pub platform: SocialPlatform,
    /// Action to confirm.
    pub action: SocialAction,
    /// The user's handle on the platform.
    pub user_handle: String,
    /// Target account handle or post ID, depending on the action.
    pub target_id: String,
}

/// Decides whether a user performed an external action.
#[async_trait]
pub trait SocialProvider: Send + Sync + std::fmt::Debug {
    /// Checks a social action (follow/like/retweet).
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Provider`] when the upstream call fails.
    async fn check_social(&self, check: &SocialCheck) -> Result<bool, QuestError>;

    /// Exchanges a Discord OAuth `code` and reports whether the user is
    /// a member of `guild_id`.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Provider`] when the token exchange or guild
    /// listing fails.
    async fn check_discord_membership(
        &self,
        code: &str,
        guild_id: &str,
    ) -> Result<bool, QuestError>;

    /// Reports whether the Telegram user belongs to the given chat.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Provider`] when the bot API call fails.
    async fn check_telegram_membership(
        &self,
        telegram_user_id: i64,
        chat_id: &str,
    ) -> Result<bool, QuestError>;
}
