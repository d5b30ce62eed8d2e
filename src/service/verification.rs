//! The verification engine.
//!
//! One entry point per task verification flow. Every flow ends in the
//! store's atomic settlement: the submission row is upserted and XP is
//! credited only on the row's first transition into `verified`, so
//! re-verifying an already-verified task never double-credits.
//!
//! Social follow/like checks consult the verification cache first; a
//! fresh cached verdict is returned without touching the provider or the
//! ledger. Membership checks (Discord, Telegram) are never cached — an
//! OAuth code is single-use and a membership can change at any moment.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use crate::domain::{
    CacheEntry, CacheKey, QuizSpec, SocialAction, SocialPlatform, SubmissionDraft, Task, TaskId,
    User, VerificationMethod, WalletAddress,
};
use crate::error::QuestError;
use crate::persistence::QuestStore;
use crate::provider::{SocialCheck, SocialProvider, telegram};

/// Result of one verification attempt, shaped for the API response.
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    /// Whether the task is now verified for the user.
    pub verified: bool,
    /// Human-readable outcome message.
    pub message: String,
    /// XP the task awards when verified (0 on failure).
    pub xp_earned: u32,
    /// Whether the verdict came from the verification cache.
    pub cached: bool,
    /// Quiz score in percent, for quiz verifications.
    pub score: Option<u32>,
}

/// Result of a Discord join verification.
#[derive(Debug, Clone)]
pub struct DiscordOutcome {
    /// Whether the OAuth user is a member of the target guild.
    pub is_member: bool,
    /// Whether the task was settled as verified for a known user.
    pub verified: bool,
    /// XP the task awards when verified.
    pub xp_earned: u32,
}

/// Runs verification flows against the store and the social provider.
#[derive(Debug, Clone)]
pub struct VerificationService {
    store: Arc<dyn QuestStore>,
    provider: Arc<dyn SocialProvider>,
    cache_ttl_secs: i64,
    telegram_bot_token: Option<String>,
}

impl VerificationService {
    /// Creates the engine.
    #[must_use]
    pub fn new(
        store: Arc<dyn QuestStore>,
        provider: Arc<dyn SocialProvider>,
        cache_ttl_secs: i64,
        telegram_bot_token: Option<String>,
    ) -> Self {
        Self {
            store,
            provider,
            cache_ttl_secs,
            telegram_bot_token,
        }
    }

    /// Settles a trusted self-report task (download, visit, form) as
    /// verified.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::UserNotFound`] / [`QuestError::TaskNotFound`]
    /// for unknown identities and [`QuestError::Persistence`] on store
    /// failure.
    pub async fn verify_manual(
        &self,
        raw_wallet: &str,
        task_id: TaskId,
        submission_data: Value,
    ) -> Result<VerifyOutcome, QuestError> {
        let user = self.load_wallet_user(raw_wallet).await?;
        let task = self.load_task(task_id).await?;

        let draft = SubmissionDraft::verified(
            VerificationMethod::Manual,
            submission_data,
            task.xp_reward,
            Utc::now(),
        );
        let settlement = self.store.settle_verification(&user, &task, draft).await?;
        tracing::info!(
            user_id = %user.id,
            task_id = %task.id,
            xp_credited = settlement.xp_credited,
            "manual task settled"
        );

        Ok(VerifyOutcome {
            verified: true,
            message: "Task completed".to_string(),
            xp_earned: task.xp_reward,
            cached: false,
            score: None,
        })
    }

    /// Verifies a follow task against the social provider, consulting
    /// the cache first.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::MissingParameter`] for an empty handle,
    /// not-found errors for unknown identities,
    /// [`QuestError::InvalidTaskConfig`] for a follow task with no target,
    /// and [`QuestError::Provider`] when the upstream check fails.
    pub async fn verify_follow(
        &self,
        raw_wallet: &str,
        user_handle: &str,
        task_id: TaskId,
    ) -> Result<VerifyOutcome, QuestError> {
        let task = self.load_task(task_id).await?;
        let submission_data = serde_json::json!({ "username": user_handle });
        self.verify_social(
            raw_wallet,
            user_handle,
            task,
            SocialAction::Follow,
            submission_data,
        )
        .await
    }

    /// Verifies a like (or retweet) task against the social provider,
    /// consulting the cache first. The target post is the one stored on
    /// the task, never one supplied by the client.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::verify_follow`].
    pub async fn verify_like(
        &self,
        raw_wallet: &str,
        user_handle: &str,
        task_id: TaskId,
    ) -> Result<VerifyOutcome, QuestError> {
        let task = self.load_task(task_id).await?;
        let action = task.social_action.unwrap_or(SocialAction::Like);
        let submission_data = serde_json::json!({ "username": user_handle });
        self.verify_social(raw_wallet, user_handle, task, action, submission_data)
            .await
    }

    /// Grades a quiz submission against the task's stored answer
    /// configuration and settles the result.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::TaskNotFound`] for an unknown task,
    /// [`QuestError::InvalidTaskConfig`] when the task stores no
    /// correct-answer configuration, and [`QuestError::Persistence`] on
    /// store failure.
    pub async fn verify_quiz(
        &self,
        user: &User,
        task_id: TaskId,
        answers: &[usize],
    ) -> Result<VerifyOutcome, QuestError> {
        let task = self.load_task(task_id).await?;
        let spec = QuizSpec::from_task(&task)?;
        let grade = spec.grade(answers);

        let now = Utc::now();
        let submission_data = serde_json::json!({ "answers": answers });
        let mut draft = if grade.passed {
            SubmissionDraft::verified(
                VerificationMethod::Quiz,
                submission_data,
                task.xp_reward,
                now,
            )
        } else {
            SubmissionDraft::rejected(VerificationMethod::Quiz, submission_data, now)
        };
        if let Value::Object(map) = &mut draft.verification_data {
            map.insert("score".to_string(), serde_json::json!(grade.score));
        }

        self.store.settle_verification(user, &task, draft).await?;

        let message = if grade.passed {
            format!("Quiz passed with a score of {}%", grade.score)
        } else {
            format!(
                "Score {}% is below the passing score of {}%",
                grade.score, spec.passing_score
            )
        };
        Ok(VerifyOutcome {
            verified: grade.passed,
            message,
            xp_earned: if grade.passed { task.xp_reward } else { 0 },
            cached: false,
            score: Some(grade.score),
        })
    }

    /// Exchanges a Discord OAuth code, checks guild membership, and
    /// settles the task when the caller's wallet maps to a known user.
    ///
    /// Membership is reported even when no wallet was supplied, so the
    /// client can show the join state before the user connects a wallet.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::MissingParameter`] for an empty code or
    /// guild ID, [`QuestError::TaskNotFound`] for an unknown task, and
    /// [`QuestError::Provider`] when the OAuth exchange or guild listing
    /// fails.
    pub async fn verify_discord_join(
        &self,
        code: &str,
        guild_id: &str,
        task_id: TaskId,
        raw_wallet: Option<&str>,
    ) -> Result<DiscordOutcome, QuestError> {
        if code.trim().is_empty() {
            return Err(QuestError::MissingParameter("code"));
        }
        if guild_id.trim().is_empty() {
            return Err(QuestError::MissingParameter("guildId"));
        }
        let task = self.load_task(task_id).await?;

        let is_member = self
            .provider
            .check_discord_membership(code, guild_id)
            .await?;

        let mut verified = false;
        if is_member {
            if let Some(user) = self.optional_wallet_user(raw_wallet).await? {
                let draft = SubmissionDraft::verified(
                    VerificationMethod::DiscordOauth,
                    serde_json::json!({ "guildId": guild_id }),
                    task.xp_reward,
                    Utc::now(),
                );
                self.store.settle_verification(&user, &task, draft).await?;
                verified = true;
            }
        }

        Ok(DiscordOutcome {
            is_member,
            verified,
            xp_earned: if verified { task.xp_reward } else { 0 },
        })
    }

    /// Validates a Telegram login-widget payload, checks membership of
    /// the task's group, and settles the result.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Unauthorized`] when the payload fails the
    /// signature check, [`QuestError::InvalidRequest`] when it carries no
    /// user ID, [`QuestError::InvalidTaskConfig`] when the task has no
    /// group URL, and [`QuestError::Provider`] when the bot API call
    /// fails.
    pub async fn verify_telegram_join(
        &self,
        raw_wallet: &str,
        task_id: TaskId,
        telegram_data: &serde_json::Map<String, Value>,
    ) -> Result<VerifyOutcome, QuestError> {
        let user = self.load_wallet_user(raw_wallet).await?;
        let task = self.load_task(task_id).await?;

        match &self.telegram_bot_token {
            Some(token) => {
                if !telegram::verify_login_payload(telegram_data, token) {
                    return Err(QuestError::Unauthorized(
                        "telegram login payload failed signature check".to_string(),
                    ));
                }
            }
            None => {
                tracing::warn!("no telegram bot token configured; accepting unsigned payload");
            }
        }

        let telegram_user_id = telegram::login_user_id(telegram_data).ok_or_else(|| {
            QuestError::InvalidRequest("telegram payload has no user id".to_string())
        })?;

        let chat_id = task
            .social_url
            .as_deref()
            .and_then(chat_id_from_invite_url)
            .ok_or_else(|| {
                QuestError::InvalidTaskConfig(format!(
                    "telegram task {} has no group URL",
                    task.id
                ))
            })?;

        let is_member = self
            .provider
            .check_telegram_membership(telegram_user_id, &chat_id)
            .await?;

        let now = Utc::now();
        let submission_data = serde_json::json!({ "telegramUserId": telegram_user_id });
        let draft = if is_member {
            SubmissionDraft::verified(
                VerificationMethod::TelegramLoginWidget,
                submission_data,
                task.xp_reward,
                now,
            )
        } else {
            SubmissionDraft::rejected(
                VerificationMethod::TelegramLoginWidget,
                submission_data,
                now,
            )
        };
        self.store.settle_verification(&user, &task, draft).await?;

        let message = if is_member {
            "Telegram membership verified".to_string()
        } else {
            "You have not joined the group yet".to_string()
        };
        Ok(VerifyOutcome {
            verified: is_member,
            message,
            xp_earned: if is_member { task.xp_reward } else { 0 },
            cached: false,
            score: None,
        })
    }

    async fn verify_social(
        &self,
        raw_wallet: &str,
        user_handle: &str,
        task: Task,
        action: SocialAction,
        submission_data: Value,
    ) -> Result<VerifyOutcome, QuestError> {
        let handle = user_handle.trim().trim_start_matches('@');
        if handle.is_empty() {
            return Err(QuestError::MissingParameter("username"));
        }
        let user = self.load_wallet_user(raw_wallet).await?;
        task.validate().map_err(QuestError::InvalidTaskConfig)?;

        let platform = task.social_platform.unwrap_or(SocialPlatform::Twitter);
        let target = task.social_target().ok_or_else(|| {
            QuestError::InvalidTaskConfig(format!("social task {} has no target", task.id))
        })?;

        let now = Utc::now();
        let key = CacheKey::new(platform, action, target);
        if let Some(entry) = self.store.cache_lookup(user.id, &key, now).await? {
            tracing::debug!(user_id = %user.id, task_id = %task.id, "cache hit");
            return Ok(VerifyOutcome {
                verified: entry.verified,
                message: social_message(action, entry.verified, target),
                xp_earned: 0,
                cached: true,
                score: None,
            });
        }

        let check = SocialCheck {
            platform,
            action,
            user_handle: handle.to_string(),
            target_id: target.to_string(),
        };
        let verdict = self.provider.check_social(&check).await?;

        let entry = CacheEntry::new(verdict, now, self.cache_ttl_secs);
        self.store.cache_store(user.id, &key, &entry).await?;

        let draft = if verdict {
            SubmissionDraft::verified(
                VerificationMethod::TwitterApi,
                submission_data,
                task.xp_reward,
                now,
            )
        } else {
            SubmissionDraft::rejected(VerificationMethod::TwitterApi, submission_data, now)
        };
        let settlement = self.store.settle_verification(&user, &task, draft).await?;
        tracing::info!(
            user_id = %user.id,
            task_id = %task.id,
            action = action.as_str(),
            verdict,
            xp_credited = settlement.xp_credited,
            "social task settled"
        );

        Ok(VerifyOutcome {
            verified: verdict,
            message: social_message(action, verdict, target),
            xp_earned: if verdict { task.xp_reward } else { 0 },
            cached: false,
            score: None,
        })
    }

    async fn load_wallet_user(&self, raw_wallet: &str) -> Result<User, QuestError> {
        let wallet = WalletAddress::new(raw_wallet);
        if wallet.is_empty() {
            return Err(QuestError::MissingParameter("userWallet"));
        }
        self.store
            .find_user_by_wallet(&wallet)
            .await?
            .ok_or(QuestError::UserNotFound)
    }

    async fn optional_wallet_user(
        &self,
        raw_wallet: Option<&str>,
    ) -> Result<Option<User>, QuestError> {
        let Some(raw) = raw_wallet else {
            return Ok(None);
        };
        let wallet = WalletAddress::new(raw);
        if wallet.is_empty() {
            return Ok(None);
        }
        self.store.find_user_by_wallet(&wallet).await
    }

    async fn load_task(&self, task_id: TaskId) -> Result<Task, QuestError> {
        self.store
            .get_task(task_id)
            .await?
            .ok_or_else(|| QuestError::TaskNotFound(*task_id.as_uuid()))
    }
}

fn social_message(action: SocialAction, verified: bool, target: &str) -> String {
    match (action, verified) {
        (SocialAction::Follow, true) => "Follow verified!".to_string(),
        (SocialAction::Follow, false) => format!("You are not following @{target} yet"),
        (SocialAction::Like, true) => "Like verified!".to_string(),
        (SocialAction::Like, false) => "You have not liked this post yet".to_string(),
        (SocialAction::Retweet, true) => "Retweet verified!".to_string(),
        (SocialAction::Retweet, false) => "You have not retweeted this post yet".to_string(),
        (SocialAction::Join, true) => "Membership verified".to_string(),
        (SocialAction::Join, false) => "You have not joined yet".to_string(),
    }
}

/// Extracts a bot-API chat identifier from a `t.me` invite URL: the last
/// path segment, prefixed with `@` unless it already carries one.
fn chat_id_from_invite_url(url: &str) -> Option<String> {
    let segment = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())?;
    if segment.starts_with('@') {
        Some(segment.to_string())
    } else {
        Some(format!("@{segment}"))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{QuestId, SubmissionStatus, TaskKind};
    use crate::persistence::QuestStore;
    use crate::persistence::memory::MemoryStore;
    use crate::provider::SimulatedProvider;

    const WALLET: &str = "0xAbCd000111";

    fn social_task(action: SocialAction) -> Task {
        Task {
            id: TaskId::new(),
            quest_id: QuestId::new(),
            title: "Follow us".to_string(),
            kind: TaskKind::Social,
            xp_reward: 50,
            order_index: 0,
            social_platform: Some(SocialPlatform::Twitter),
            social_action: Some(action),
            social_url: None,
            social_username: Some("questhub".to_string()),
            social_post_id: Some("17291".to_string()),
            learn_questions: None,
            learn_passing_score: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn manual_task() -> Task {
        Task {
            kind: TaskKind::Manual,
            social_platform: None,
            social_action: None,
            social_username: None,
            social_post_id: None,
            title: "Download the app".to_string(),
            ..social_task(SocialAction::Follow)
        }
    }

    fn quiz_task() -> Task {
        Task {
            kind: TaskKind::Learn,
            social_platform: None,
            social_action: None,
            social_username: None,
            social_post_id: None,
            title: "Protocol quiz".to_string(),
            learn_questions: Some(serde_json::json!({ "correctAnswers": [1] })),
            xp_reward: 100,
            ..social_task(SocialAction::Follow)
        }
    }

    async fn engine_with(
        task: Task,
        pass_rate: f64,
    ) -> (VerificationService, Arc<MemoryStore>, User) {
        let store = Arc::new(MemoryStore::new());
        let (_, user) = store.seed_quest_with_task(task, WALLET).await;
        let service = VerificationService::new(
            Arc::clone(&store) as Arc<dyn QuestStore>,
            Arc::new(SimulatedProvider::new(pass_rate)),
            300,
            Some("123:token".to_string()),
        );
        (service, store, user)
    }

    #[tokio::test]
    async fn manual_verification_credits_xp_exactly_once() {
        let task = manual_task();
        let task_id = task.id;
        let (service, store, user) = engine_with(task, 1.0).await;

        let Ok(first) = service
            .verify_manual(WALLET, task_id, serde_json::json!({}))
            .await
        else {
            panic!("manual verification failed");
        };
        assert!(first.verified);
        assert_eq!(first.xp_earned, 50);

        let Ok(_second) = service
            .verify_manual(WALLET, task_id, serde_json::json!({}))
            .await
        else {
            panic!("manual verification failed");
        };

        let Ok(Some(stored)) = store.get_user(user.id).await else {
            panic!("user lookup failed");
        };
        assert_eq!(stored.total_xp, 50);
    }

    #[tokio::test]
    async fn concurrent_settlements_of_one_task_credit_once() {
        let task = manual_task();
        let task_id = task.id;
        let (service, store, user) = engine_with(task, 1.0).await;

        let (first, second) = tokio::join!(
            service.verify_manual(WALLET, task_id, serde_json::json!({})),
            service.verify_manual(WALLET, task_id, serde_json::json!({}))
        );
        assert!(first.is_ok());
        assert!(second.is_ok());

        let Ok(Some(stored)) = store.get_user(user.id).await else {
            panic!("user lookup failed");
        };
        assert_eq!(stored.total_xp, 50);
    }

    #[tokio::test]
    async fn expired_cache_entry_forces_a_fresh_provider_check() {
        let task = social_task(SocialAction::Follow);
        let task_id = task.id;
        let store = Arc::new(MemoryStore::new());
        let (_, user) = store.seed_quest_with_task(task, WALLET).await;
        // Zero TTL: every stored entry is already expired on the next read.
        let service = VerificationService::new(
            Arc::clone(&store) as Arc<dyn QuestStore>,
            Arc::new(SimulatedProvider::new(1.0)),
            0,
            None,
        );

        let Ok(first) = service.verify_follow(WALLET, "alice", task_id).await else {
            panic!("follow verification failed");
        };
        assert!(first.verified);
        assert!(!first.cached);

        let Ok(second) = service.verify_follow(WALLET, "alice", task_id).await else {
            panic!("follow verification failed");
        };
        assert!(second.verified);
        assert!(!second.cached);
        assert_eq!(second.xp_earned, 50);

        // The re-check settles again but never re-credits.
        let Ok(Some(stored)) = store.get_user(user.id).await else {
            panic!("user lookup failed");
        };
        assert_eq!(stored.total_xp, 50);
    }

    #[tokio::test]
    async fn single_task_quest_completion_is_counted() {
        let task = manual_task();
        let task_id = task.id;
        let (service, store, user) = engine_with(task, 1.0).await;

        let Ok(_) = service
            .verify_manual(WALLET, task_id, serde_json::json!({}))
            .await
        else {
            panic!("manual verification failed");
        };

        let Ok(Some(stored)) = store.get_user(user.id).await else {
            panic!("user lookup failed");
        };
        assert_eq!(stored.completed_quests, 1);
    }

    #[tokio::test]
    async fn passing_follow_settles_then_second_attempt_hits_cache() {
        let task = social_task(SocialAction::Follow);
        let task_id = task.id;
        let (service, store, user) = engine_with(task, 1.0).await;

        let Ok(first) = service.verify_follow(WALLET, "alice", task_id).await else {
            panic!("follow verification failed");
        };
        assert!(first.verified);
        assert!(!first.cached);
        assert_eq!(first.xp_earned, 50);

        let Ok(second) = service.verify_follow(WALLET, "alice", task_id).await else {
            panic!("follow verification failed");
        };
        assert!(second.verified);
        assert!(second.cached);
        assert_eq!(second.xp_earned, 0);

        let Ok(Some(stored)) = store.get_user(user.id).await else {
            panic!("user lookup failed");
        };
        assert_eq!(stored.total_xp, 50);
    }

    #[tokio::test]
    async fn failing_follow_records_rejection_with_zero_xp() {
        let task = social_task(SocialAction::Follow);
        let task_id = task.id;
        let (service, store, user) = engine_with(task, 0.0).await;

        let Ok(outcome) = service.verify_follow(WALLET, "alice", task_id).await else {
            panic!("follow verification failed");
        };
        assert!(!outcome.verified);
        assert_eq!(outcome.xp_earned, 0);

        let Ok(Some(submission)) = store.get_submission(user.id, task_id).await else {
            panic!("submission lookup failed");
        };
        assert_eq!(submission.status, SubmissionStatus::Rejected);

        let Ok(Some(stored)) = store.get_user(user.id).await else {
            panic!("user lookup failed");
        };
        assert_eq!(stored.total_xp, 0);
    }

    #[tokio::test]
    async fn empty_handle_is_rejected() {
        let task = social_task(SocialAction::Follow);
        let task_id = task.id;
        let (service, _, _) = engine_with(task, 1.0).await;

        let result = service.verify_follow(WALLET, "  @ ", task_id).await;
        assert!(matches!(result, Err(QuestError::MissingParameter(_))));
    }

    #[tokio::test]
    async fn unknown_task_is_not_found() {
        let task = social_task(SocialAction::Follow);
        let (service, _, _) = engine_with(task, 1.0).await;

        let result = service.verify_follow(WALLET, "alice", TaskId::new()).await;
        assert!(matches!(result, Err(QuestError::TaskNotFound(_))));
    }

    #[tokio::test]
    async fn quiz_pass_awards_xp_and_reports_score() {
        let task = quiz_task();
        let task_id = task.id;
        let (service, store, user) = engine_with(task, 1.0).await;

        let Ok(outcome) = service.verify_quiz(&user, task_id, &[1]).await else {
            panic!("quiz verification failed");
        };
        assert!(outcome.verified);
        assert_eq!(outcome.score, Some(100));
        assert_eq!(outcome.xp_earned, 100);

        let Ok(Some(stored)) = store.get_user(user.id).await else {
            panic!("user lookup failed");
        };
        assert_eq!(stored.total_xp, 100);
    }

    #[tokio::test]
    async fn quiz_fail_settles_rejected_with_score() {
        let task = quiz_task();
        let task_id = task.id;
        let (service, store, user) = engine_with(task, 1.0).await;

        let Ok(outcome) = service.verify_quiz(&user, task_id, &[0]).await else {
            panic!("quiz verification failed");
        };
        assert!(!outcome.verified);
        assert_eq!(outcome.score, Some(0));

        let Ok(Some(submission)) = store.get_submission(user.id, task_id).await else {
            panic!("submission lookup failed");
        };
        assert_eq!(submission.status, SubmissionStatus::Rejected);
    }

    #[tokio::test]
    async fn discord_membership_without_wallet_reports_but_does_not_settle() {
        let task = social_task(SocialAction::Join);
        let task_id = task.id;
        let (service, store, user) = engine_with(task, 1.0).await;

        let Ok(outcome) = service
            .verify_discord_join("oauth-code", "guild-1", task_id, None)
            .await
        else {
            panic!("discord verification failed");
        };
        assert!(outcome.is_member);
        assert!(!outcome.verified);
        assert_eq!(outcome.xp_earned, 0);

        let Ok(None) = store.get_submission(user.id, task_id).await else {
            panic!("unexpected submission");
        };
    }

    #[tokio::test]
    async fn discord_membership_with_wallet_settles_and_awards() {
        let task = social_task(SocialAction::Join);
        let task_id = task.id;
        let (service, store, user) = engine_with(task, 1.0).await;

        let Ok(outcome) = service
            .verify_discord_join("oauth-code", "guild-1", task_id, Some(WALLET))
            .await
        else {
            panic!("discord verification failed");
        };
        assert!(outcome.verified);
        assert_eq!(outcome.xp_earned, 50);

        let Ok(Some(stored)) = store.get_user(user.id).await else {
            panic!("user lookup failed");
        };
        assert_eq!(stored.total_xp, 50);
    }

    #[tokio::test]
    async fn unsigned_telegram_payload_is_unauthorized() {
        let mut task = social_task(SocialAction::Join);
        task.social_url = Some("https://t.me/questhub".to_string());
        let task_id = task.id;
        let (service, _, _) = engine_with(task, 1.0).await;

        let Some(data) = serde_json::json!({ "id": 42 }).as_object().cloned() else {
            panic!("object literal");
        };
        let result = service.verify_telegram_join(WALLET, task_id, &data).await;
        assert!(matches!(result, Err(QuestError::Unauthorized(_))));
    }

    #[test]
    fn invite_url_maps_to_bot_chat_id() {
        assert_eq!(
            chat_id_from_invite_url("https://t.me/questhub").as_deref(),
            Some("@questhub")
        );
        assert_eq!(
            chat_id_from_invite_url("https://t.me/questhub/").as_deref(),
            Some("@questhub")
        );
        assert_eq!(chat_id_from_invite_url("").as_deref(), None);
    }
}
