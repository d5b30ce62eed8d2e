//! Randomized provider for environments without platform credentials.

use async_trait::async_trait;
use rand::Rng;

use super::{SocialCheck, SocialProvider};
use crate::error::QuestError;

/// Simulated provider: passes with a fixed probability instead of
/// calling any platform API. Default pass rate is 0.7, matching the
/// demo behavior this replaces.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedProvider {
    pass_rate: f64,
}

impl SimulatedProvider {
    /// Creates a provider with the given pass probability, clamped to
    /// `0.0..=1.0`.
    #[must_use]
    pub fn new(pass_rate: f64) -> Self {
        Self {
            pass_rate: pass_rate.clamp(0.0, 1.0),
        }
    }

    fn roll(&self) -> bool {
        rand::thread_rng().gen_bool(self.pass_rate)
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new(0.7)
    }
}

#[async_trait]
impl SocialProvider for SimulatedProvider {
    async fn check_social(&self, check: &SocialCheck) -> Result<bool, QuestError> {
        let verdict = self.roll();
        tracing::debug!(
            platform = check.platform.as_str(),
            action = check.action.as_str(),
            target = %check.target_id,
            verdict,
            "simulated social check"
        );
        Ok(verdict)
    }

    async fn check_discord_membership(
        &self,
        _code: &str,
        guild_id: &str,
    ) -> Result<bool, QuestError> {
        let verdict = self.roll();
        tracing::debug!(guild_id, verdict, "simulated discord membership check");
        Ok(verdict)
    }

    async fn check_telegram_membership(
        &self,
        telegram_user_id: i64,
        chat_id: &str,
    ) -> Result<bool, QuestError> {
        let verdict = self.roll();
        tracing::debug!(telegram_user_id, chat_id, verdict, "simulated telegram membership check");
        Ok(verdict)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{SocialAction, SocialPlatform};

    fn follow_check() -> SocialCheck {
        SocialCheck {
            platform: SocialPlatform::Twitter,
            action: SocialAction::Follow,
            user_handle: "alice".to_string(),
            target_id: "questhub".to_string(),
        }
    }

    #[tokio::test]
    async fn pass_rate_one_always_passes() {
        let provider = SimulatedProvider::new(1.0);
        for _ in 0..10 {
            let Ok(verdict) = provider.check_social(&follow_check()).await else {
                panic!("simulated check cannot fail");
            };
            assert!(verdict);
        }
    }

    #[tokio::test]
    async fn pass_rate_zero_never_passes() {
        let provider = SimulatedProvider::new(0.0);
        for _ in 0..10 {
            let Ok(verdict) = provider.check_discord_membership("code", "guild").await else {
                panic!("simulated check cannot fail");
            };
            assert!(!verdict);
        }
    }

    #[test]
    fn out_of_range_rate_is_clamped() {
        assert!((SimulatedProvider::new(3.0).pass_rate - 1.0).abs() < f64::EPSILON);
        assert!(SimulatedProvider::new(-1.0).pass_rate.abs() < f64::EPSILON);
    }
}
