//! Identity resolution: wallet-based login and bearer sessions.
//!
//! The wallet address is the primary identity. Resolution is an upsert:
//! the first time a wallet is seen a user row is created with ledger
//! defaults; every later resolution of the same wallet (in any case
//! variant) returns that same row. Sessions are stateless JWTs carrying
//! the user ID.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::{User, UserId, WalletAddress};
use crate::error::QuestError;
use crate::persistence::QuestStore;

/// JWT claims for a bearer session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID the token authenticates.
    pub sub: String,
    /// Expiry (seconds since epoch).
    pub exp: i64,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
}

/// Resolves wallets to users and issues/validates session tokens.
#[derive(Debug, Clone)]
pub struct IdentityService {
    store: Arc<dyn QuestStore>,
    jwt_secret: String,
    session_ttl_secs: u64,
}

impl IdentityService {
    /// Creates the service.
    #[must_use]
    pub fn new(store: Arc<dyn QuestStore>, jwt_secret: String, session_ttl_secs: u64) -> Self {
        Self {
            store,
            jwt_secret,
            session_ttl_secs,
        }
    }

    /// Resolves a raw client-supplied wallet address to a user, creating
    /// the user on first sight.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::MissingParameter`] for an empty address and
    /// [`QuestError::Persistence`] on store failure.
    pub async fn resolve_wallet(&self, raw_wallet: &str) -> Result<User, QuestError> {
        let wallet = WalletAddress::new(raw_wallet);
        if wallet.is_empty() {
            return Err(QuestError::MissingParameter("walletAddress"));
        }
        self.store.upsert_user_by_wallet(&wallet).await
    }

    /// Looks up the user for a raw wallet address without creating one.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::MissingParameter`] for an empty address,
    /// [`QuestError::UserNotFound`] when no user has this wallet, and
    /// [`QuestError::Persistence`] on store failure.
    pub async fn find_wallet_user(&self, raw_wallet: &str) -> Result<User, QuestError> {
        let wallet = WalletAddress::new(raw_wallet);
        if wallet.is_empty() {
            return Err(QuestError::MissingParameter("userWallet"));
        }
        self.store
            .find_user_by_wallet(&wallet)
            .await?
            .ok_or(QuestError::UserNotFound)
    }

    /// Resolves the wallet and issues a bearer session token for it.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::resolve_wallet`] errors; returns
    /// [`QuestError::Internal`] when token signing fails.
    pub async fn login(&self, raw_wallet: &str) -> Result<(User, String), QuestError> {
        let user = self.resolve_wallet(raw_wallet).await?;
        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Signs a session token for the user.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Internal`] when signing fails.
    pub fn issue_token(&self, user: &User) -> Result<String, QuestError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.session_ttl_secs).unwrap_or(86_400);
        let claims = Claims {
            sub: user.id.to_string(),
            exp: now + ttl,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| QuestError::Internal(format!("token signing failed: {e}")))
    }

    /// Validates a bearer token and returns the authenticated user ID.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Unauthorized`] for an expired, malformed, or
    /// wrongly-signed token.
    pub fn authenticate(&self, token: &str) -> Result<UserId, QuestError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| QuestError::Unauthorized(format!("invalid session token: {e}")))?;

        let uuid: uuid::Uuid = data
            .claims
            .sub
            .parse()
            .map_err(|_| QuestError::Unauthorized("malformed token subject".to_string()))?;
        Ok(UserId::from_uuid(uuid))
    }

    /// Validates a bearer token and loads the user it names.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::Unauthorized`] for a bad token and
    /// [`QuestError::UserNotFound`] when the user row no longer exists.
    pub async fn user_from_token(&self, token: &str) -> Result<User, QuestError> {
        let user_id = self.authenticate(token)?;
        self.store
            .get_user(user_id)
            .await?
            .ok_or(QuestError::UserNotFound)
    }
}
