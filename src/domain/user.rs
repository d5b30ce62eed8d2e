//! User profile aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::UserId;
use super::wallet::WalletAddress;

/// A platform user.
///
/// Created on first successful authentication (wallet connect or social
/// login) with XP 0, level 1, and no completed quests. Mutated by the
/// XP ledger on verified submissions. Never hard-deleted in normal
/// operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Normalized wallet address, when a wallet is linked.
    pub wallet_address: Option<WalletAddress>,
    /// Email, when a social identity is linked.
    pub email: Option<String>,
    /// Display name.
    pub username: Option<String>,
    /// Cumulative XP.
    pub total_xp: u64,
    /// Level derived from XP by the configured policy.
    pub level: u32,
    /// Number of quests fully completed.
    pub completed_quests: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Builds a brand-new user for a wallet, with ledger defaults.
    #[must_use]
    pub fn new_for_wallet(wallet: WalletAddress, now: DateTime<Utc>) -> Self {
        let suffix: String = wallet
            .as_str()
            .chars()
            .rev()
            .take(6)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        Self {
            id: UserId::new(),
            username: Some(format!("User{suffix}")),
            wallet_address: Some(wallet),
            email: None,
            total_xp: 0,
            level: 1,
            completed_quests: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
