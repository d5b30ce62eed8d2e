//! # quest-gateway
//!
//! REST API gateway for a quest/loyalty platform: wallet-based identity,
//! a quest/task catalog, a pluggable verification engine, a per-(user,
//! task) submission ledger, and an XP aggregator with an explicit
//! XP→level policy.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── IdentityService (service/)
//!     ├── VerificationService (service/)
//!     │
//!     ├── SocialProvider (provider/) — live or simulated
//!     │
//!     └── QuestStore (persistence/) — PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod provider;
pub mod service;
