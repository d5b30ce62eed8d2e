//! Normalized wallet addresses.
//!
//! Wallet addresses arrive from clients in arbitrary case. The mapping to
//! a user row must be case-insensitive, so every address is lower-cased
//! (and trimmed) at the boundary and stored in that form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A wallet address, normalized to lower-case.
///
/// Construction is the only way to obtain one, so any `WalletAddress`
/// held by the rest of the system is already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Normalizes a raw client-supplied address: trims surrounding
    /// whitespace and lower-cases the remainder.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// Returns the normalized address string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the normalized address is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
