//! Data Transfer Objects for REST request/response serialization.
//!
//! All field names are camelCase on the wire, matching the web clients
//! this API serves.

pub mod quest_dto;
pub mod user_dto;
pub mod verify_dto;

pub use quest_dto::*;
pub use user_dto::*;
pub use verify_dto::*;
