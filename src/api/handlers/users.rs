//! User identity and authentication endpoint handlers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{UserDto, UserResponse, WalletLoginResponse, WalletRequest};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, QuestError};

/// `POST /auth/wallet-login` — Resolve a wallet and issue a session token.
///
/// # Errors
///
/// Returns [`QuestError`] on an empty wallet address or store failure.
#[utoipa::path(
    post,
    path = "/api/auth/wallet-login",
    tag = "Users",
    summary = "Wallet login",
    description = "Resolves the wallet to a user (creating one on first sight) and issues a bearer session token.",
    request_body = WalletRequest,
    responses(
        (status = 200, description = "Login succeeded", body = WalletLoginResponse),
        (status = 400, description = "Missing wallet address", body = ErrorResponse),
    )
)]
pub async fn wallet_login(
    State(state): State<AppState>,
    Json(req): Json<WalletRequest>,
) -> Result<impl IntoResponse, QuestError> {
    let (user, token) = state.identity.login(&req.wallet_address).await?;
    Ok(Json(WalletLoginResponse {
        token,
        user: UserDto::from(user),
    }))
}

/// `POST /users/upsert` — Resolve a wallet to a user, creating one on
/// first sight.
///
/// # Errors
///
/// Returns [`QuestError`] on an empty wallet address or store failure.
#[utoipa::path(
    post,
    path = "/api/users/upsert",
    tag = "Users",
    summary = "Upsert user by wallet",
    description = "Returns the user for the wallet, creating a profile with XP 0 and level 1 if none exists. Case variants of the same address resolve to the same user.",
    request_body = WalletRequest,
    responses(
        (status = 200, description = "User resolved", body = UserResponse),
        (status = 400, description = "Missing wallet address", body = ErrorResponse),
    )
)]
pub async fn upsert_user(
    State(state): State<AppState>,
    Json(req): Json<WalletRequest>,
) -> Result<impl IntoResponse, QuestError> {
    let user = state.identity.resolve_wallet(&req.wallet_address).await?;
    Ok(Json(UserResponse {
        user: UserDto::from(user),
    }))
}

/// `GET /users/:wallet` — Look up a user by wallet address.
///
/// # Errors
///
/// Returns [`QuestError::UserNotFound`] when no user has this wallet.
#[utoipa::path(
    get,
    path = "/api/users/{wallet}",
    tag = "Users",
    summary = "Get user by wallet",
    description = "Looks up the user profile for a wallet address without creating one.",
    params(
        ("wallet" = String, Path, description = "Wallet address (any case variant)"),
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "No user with this wallet", body = ErrorResponse),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(wallet): Path<String>,
) -> Result<impl IntoResponse, QuestError> {
    let user = state.identity.find_wallet_user(&wallet).await?;
    Ok(Json(UserResponse {
        user: UserDto::from(user),
    }))
}

/// User routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/wallet-login", post(wallet_login))
        .route("/users/upsert", post(upsert_user))
        .route("/users/{wallet}", get(get_user))
}
