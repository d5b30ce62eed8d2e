//! REST endpoint handlers organized by resource.

pub mod quests;
pub mod system;
pub mod users;
pub mod verify;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes mounted under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(users::routes())
        .merge(quests::routes())
        .merge(verify::routes())
}
