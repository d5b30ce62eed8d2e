//! Service layer: identity resolution and the verification engine.
//!
//! Services own the business rules and are constructed once at startup
//! with their store/provider dependencies behind trait objects. Handlers
//! stay thin: parse the request, call one service method, shape the
//! response.

pub mod identity;
pub mod verification;

pub use identity::IdentityService;
pub use verification::VerificationService;
