//! Shared application state injected into all route handlers.

use std::sync::Arc;

use crate::persistence::QuestStore;
use crate::service::{IdentityService, VerificationService};

/// Application state shared across handlers via axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Wallet identity resolution and bearer sessions.
    pub identity: Arc<IdentityService>,
    /// Task verification engine.
    pub verification: Arc<VerificationService>,
    /// Direct store access for catalog reads.
    pub store: Arc<dyn QuestStore>,
}

impl AppState {
    /// Creates the state from its services.
    #[must_use]
    pub fn new(
        identity: Arc<IdentityService>,
        verification: Arc<VerificationService>,
        store: Arc<dyn QuestStore>,
    ) -> Self {
        Self {
            identity,
            verification,
            store,
        }
    }
}
