//! Live provider backed by the real platform APIs.
//!
//! Twitter checks use the v2 bearer-token endpoints; Discord membership
//! goes through the OAuth authorization-code exchange followed by a
//! guild listing; Telegram membership uses the bot `getChatMember` call.
//! No retry or backoff — an upstream failure surfaces directly as a
//! provider error, as the callers expect.

use async_trait::async_trait;
use serde_json::Value;

use super::{SocialCheck, SocialProvider};
use crate::config::QuestConfig;
use crate::domain::SocialAction;
use crate::error::QuestError;

const TWITTER_API: &str = "https://api.twitter.com/2";
const DISCORD_API: &str = "https://discord.com/api";
const TELEGRAM_API: &str = "https://api.telegram.org";

/// Provider that queries the real platform APIs over HTTPS.
#[derive(Debug, Clone)]
pub struct LiveProvider {
    http: reqwest::Client,
    twitter_bearer_token: Option<String>,
    discord_client_id: Option<String>,
    discord_client_secret: Option<String>,
    discord_redirect_uri: Option<String>,
    telegram_bot_token: Option<String>,
}

impl LiveProvider {
    /// Builds a provider from the gateway configuration.
    #[must_use]
    pub fn new(config: &QuestConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            twitter_bearer_token: config.twitter_bearer_token.clone(),
            discord_client_id: config.discord_client_id.clone(),
            discord_client_secret: config.discord_client_secret.clone(),
            discord_redirect_uri: config.discord_redirect_uri.clone(),
            telegram_bot_token: config.telegram_bot_token.clone(),
        }
    }

    fn twitter_token(&self) -> Result<&str, QuestError> {
        self.twitter_bearer_token
            .as_deref()
            .ok_or_else(|| QuestError::Provider("twitter bearer token not configured".to_string()))
    }

    async fn twitter_get(&self, url: &str) -> Result<Value, QuestError> {
        let token = self.twitter_token()?;
        let res = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| QuestError::Provider(format!("twitter request failed: {e}")))?;

        if !res.status().is_success() {
            return Err(QuestError::Provider(format!(
                "twitter returned {}",
                res.status()
            )));
        }
        res.json::<Value>()
            .await
            .map_err(|e| QuestError::Provider(format!("twitter response decode failed: {e}")))
    }

    /// Resolves a Twitter handle to the account's numeric ID.
    async fn twitter_user_id(&self, handle: &str) -> Result<String, QuestError> {
        let body = self
            .twitter_get(&format!("{TWITTER_API}/users/by/username/{handle}"))
            .await?;
        body.pointer("/data/id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| QuestError::Provider(format!("twitter user not found: {handle}")))
    }

    /// Lists the endpoint for the user and reports whether any returned
    /// item carries `field == expected` (case-insensitive).
    async fn twitter_list_contains(
        &self,
        url: &str,
        field: &str,
        expected: &str,
    ) -> Result<bool, QuestError> {
        let body = self.twitter_get(url).await?;
        let found = body
            .get("data")
            .and_then(Value::as_array)
            .is_some_and(|items| {
                items.iter().any(|item| {
                    item.get(field)
                        .and_then(Value::as_str)
                        .is_some_and(|v| v.eq_ignore_ascii_case(expected))
                })
            });
        Ok(found)
    }
}

#[async_trait]
impl SocialProvider for LiveProvider {
    async fn check_social(&self, check: &SocialCheck) -> Result<bool, QuestError> {
        let user_id = self.twitter_user_id(&check.user_handle).await?;
        match check.action {
            SocialAction::Follow => {
                self.twitter_list_contains(
                    &format!("{TWITTER_API}/users/{user_id}/following"),
                    "username",
                    &check.target_id,
                )
                .await
            }
            SocialAction::Like => {
                self.twitter_list_contains(
                    &format!("{TWITTER_API}/users/{user_id}/liked_tweets"),
                    "id",
                    &check.target_id,
                )
                .await
            }
            SocialAction::Retweet => {
                self.twitter_list_contains(
                    &format!("{TWITTER_API}/users/{user_id}/retweeted_tweets"),
                    "id",
                    &check.target_id,
                )
                .await
            }
            SocialAction::Join => Err(QuestError::Provider(
                "join checks go through the membership endpoints".to_string(),
            )),
        }
    }

    async fn check_discord_membership(
        &self,
        code: &str,
        guild_id: &str,
    ) -> Result<bool, QuestError> {
        let (client_id, client_secret, redirect_uri) = match (
            self.discord_client_id.as_deref(),
            self.discord_client_secret.as_deref(),
            self.discord_redirect_uri.as_deref(),
        ) {
            (Some(id), Some(secret), Some(uri)) => (id, secret, uri),
            _ => {
                return Err(QuestError::Provider(
                    "discord oauth credentials not configured".to_string(),
                ));
            }
        };

        // Exchange the authorization code for a user access token.
        let token_res = self
            .http
            .post(format!("{DISCORD_API}/oauth2/token"))
            .form(&[
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("scope", "identify guilds"),
            ])
            .send()
            .await
            .map_err(|e| QuestError::Provider(format!("discord token exchange failed: {e}")))?;

        if !token_res.status().is_success() {
            return Err(QuestError::Provider(format!(
                "discord token exchange returned {}",
                token_res.status()
            )));
        }

        let token_body: Value = token_res
            .json()
            .await
            .map_err(|e| QuestError::Provider(format!("discord token decode failed: {e}")))?;
        let access_token = token_body
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                QuestError::Provider("no access token received from discord".to_string())
            })?;

        // List the user's guilds and look for the target.
        let guilds_res = self
            .http
            .get(format!("{DISCORD_API}/users/@me/guilds"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| QuestError::Provider(format!("discord guild listing failed: {e}")))?;

        if !guilds_res.status().is_success() {
            return Err(QuestError::Provider(format!(
                "discord guild listing returned {}",
                guilds_res.status()
            )));
        }

        let guilds: Value = guilds_res
            .json()
            .await
            .map_err(|e| QuestError::Provider(format!("discord guilds decode failed: {e}")))?;
        let is_member = guilds.as_array().is_some_and(|list| {
            list.iter().any(|guild| {
                guild
                    .get("id")
                    .and_then(Value::as_str)
                    .is_some_and(|id| id == guild_id)
            })
        });
        Ok(is_member)
    }

    async fn check_telegram_membership(
        &self,
        telegram_user_id: i64,
        chat_id: &str,
    ) -> Result<bool, QuestError> {
        let token = self.telegram_bot_token.as_deref().ok_or_else(|| {
            QuestError::Provider("telegram bot token not configured".to_string())
        })?;

        let res = self
            .http
            .get(format!("{TELEGRAM_API}/bot{token}/getChatMember"))
            .query(&[
                ("chat_id", chat_id.to_string()),
                ("user_id", telegram_user_id.to_string()),
            ])
            .send()
            .await
            .map_err(|e| QuestError::Provider(format!("telegram request failed: {e}")))?;

        if !res.status().is_success() {
            return Err(QuestError::Provider(format!(
                "telegram returned {}",
                res.status()
            )));
        }

        let body: Value = res
            .json()
            .await
            .map_err(|e| QuestError::Provider(format!("telegram response decode failed: {e}")))?;

        // Any status other than "left"/"kicked" counts as membership.
        let ok = body.get("ok").and_then(Value::as_bool).unwrap_or(false);
        let status = body.pointer("/result/status").and_then(Value::as_str);
        Ok(ok && status.is_some_and(|s| s != "left" && s != "kicked"))
    }
}
