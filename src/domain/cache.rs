//! Social verification cache entries.
//!
//! Memoizes a (user, platform, action, target) check for a short window
//! to avoid redundant external API calls. Rows are never evicted in the
//! background; correctness comes from checking `expires_at` on every
//! read. A stale or missing row simply forces a fresh provider check.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::task::{SocialAction, SocialPlatform};

/// Default cache time-to-live in seconds (5 minutes).
pub const DEFAULT_CACHE_TTL_SECS: i64 = 300;

/// Natural key of a cache row (scoped per user by the store).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Platform checked.
    pub platform: SocialPlatform,
    /// Action checked.
    pub action: SocialAction,
    /// Target handle or post ID.
    pub target_id: String,
}

impl CacheKey {
    /// Builds a key from platform, action, and target.
    #[must_use]
    pub fn new(platform: SocialPlatform, action: SocialAction, target_id: &str) -> Self {
        Self {
            platform,
            action,
            target_id: target_id.to_string(),
        }
    }
}

/// A memoized verification result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The memoized verdict.
    pub verified: bool,
    /// Metadata recorded when the check ran.
    pub verification_data: serde_json::Value,
    /// Entry is valid strictly before this instant.
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Builds a fresh entry expiring `ttl_secs` from `now`.
    #[must_use]
    pub fn new(verified: bool, now: DateTime<Utc>, ttl_secs: i64) -> Self {
        Self {
            verified,
            verification_data: serde_json::json!({ "checked_at": now }),
            expires_at: now + Duration::seconds(ttl_secs),
        }
    }

    /// A hit is valid only while `expires_at > now`. An expired row is
    /// treated as a miss.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_is_fresh_before_expiry() {
        let now = Utc::now();
        let entry = CacheEntry::new(true, now, DEFAULT_CACHE_TTL_SECS);
        assert!(entry.is_fresh(now));
        assert!(entry.is_fresh(now + Duration::seconds(DEFAULT_CACHE_TTL_SECS - 1)));
    }

    #[test]
    fn entry_is_stale_at_and_after_expiry() {
        let now = Utc::now();
        let entry = CacheEntry::new(false, now, DEFAULT_CACHE_TTL_SECS);
        assert!(!entry.is_fresh(now + Duration::seconds(DEFAULT_CACHE_TTL_SECS)));
        assert!(!entry.is_fresh(now + Duration::hours(1)));
    }

    #[test]
    fn key_distinguishes_actions_and_targets() {
        let follow = CacheKey::new(SocialPlatform::Twitter, SocialAction::Follow, "questhub");
        let like = CacheKey::new(SocialPlatform::Twitter, SocialAction::Like, "questhub");
        let other = CacheKey::new(SocialPlatform::Twitter, SocialAction::Follow, "elsewhere");
        assert_ne!(follow, like);
        assert_ne!(follow, other);
    }
}
