//! User and authentication DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;

/// Request body for `POST /auth/wallet-login` and `POST /users/upsert`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalletRequest {
    /// The wallet address to resolve (any case variant).
    pub wallet_address: String,
}

/// A user profile as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Normalized wallet address.
    pub wallet_address: Option<String>,
    /// Display name.
    pub username: Option<String>,
    /// Cumulative XP.
    pub total_xp: u64,
    /// Current level.
    pub level: u32,
    /// Fully completed quests.
    pub completed_quests: u32,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            wallet_address: user.wallet_address.map(|w| w.as_str().to_string()),
            username: user.username,
            total_xp: user.total_xp,
            level: user.level,
            completed_quests: user.completed_quests,
            created_at: user.created_at,
        }
    }
}

/// Response body for `POST /auth/wallet-login`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WalletLoginResponse {
    /// Bearer session token.
    pub token: String,
    /// The resolved user.
    pub user: UserDto,
}

/// Response body for `POST /users/upsert` and `GET /users/{wallet}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// The resolved user.
    pub user: UserDto,
}
