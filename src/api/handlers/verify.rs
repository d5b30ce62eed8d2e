//! Task verification endpoint handlers.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{
    DiscordJoinRequest, DiscordJoinResponse, LearnCompletionRequest, ManualCompletionRequest,
    TelegramJoinRequest, TwitterFollowRequest, TwitterLikeRequest, VerifyResponse,
};
use crate::app_state::AppState;
use crate::domain::TaskId;
use crate::error::{ErrorResponse, QuestError};

/// `POST /verify/manual-completion` — Settle a trusted self-report task.
///
/// # Errors
///
/// Returns [`QuestError`] for unknown wallets/tasks or store failure.
#[utoipa::path(
    post,
    path = "/api/verify/manual-completion",
    tag = "Verification",
    summary = "Complete a manual task",
    description = "Settles a download/visit/form task as verified and credits its XP on first completion.",
    responses(
        (status = 200, description = "Task settled", body = VerifyResponse),
        (status = 400, description = "Missing parameter", body = ErrorResponse),
        (status = 404, description = "Unknown user or task", body = ErrorResponse),
    )
)]
pub async fn manual_completion(
    State(state): State<AppState>,
    Json(req): Json<ManualCompletionRequest>,
) -> Result<impl IntoResponse, QuestError> {
    let data = req.submission_data.unwrap_or(serde_json::Value::Null);
    let outcome = state
        .verification
        .verify_manual(&req.user_wallet, TaskId::from_uuid(req.task_id), data)
        .await?;
    Ok(Json(VerifyResponse::from(outcome)))
}

/// `POST /verify/twitter-follow` — Verify a follow task.
///
/// # Errors
///
/// Returns [`QuestError`] for missing parameters, unknown identities, a
/// misconfigured task, or a provider failure.
#[utoipa::path(
    post,
    path = "/api/verify/twitter-follow",
    tag = "Verification",
    summary = "Verify a Twitter follow",
    description = "Checks whether the user follows the task's target account. A fresh cached verdict is returned without re-querying the platform.",
    request_body = TwitterFollowRequest,
    responses(
        (status = 200, description = "Verification result", body = VerifyResponse),
        (status = 400, description = "Missing parameter", body = ErrorResponse),
        (status = 404, description = "Unknown user or task", body = ErrorResponse),
        (status = 422, description = "Task has no target account", body = ErrorResponse),
    )
)]
pub async fn twitter_follow(
    State(state): State<AppState>,
    Json(req): Json<TwitterFollowRequest>,
) -> Result<impl IntoResponse, QuestError> {
    let outcome = state
        .verification
        .verify_follow(
            &req.user_wallet,
            &req.username,
            TaskId::from_uuid(req.task_id),
        )
        .await?;
    Ok(Json(VerifyResponse::from(outcome)))
}

/// `POST /verify/twitter-like` — Verify a like (or retweet) task.
///
/// # Errors
///
/// Returns [`QuestError`] for missing parameters, unknown identities, a
/// misconfigured task, or a provider failure.
#[utoipa::path(
    post,
    path = "/api/verify/twitter-like",
    tag = "Verification",
    summary = "Verify a Twitter like",
    description = "Checks whether the user liked (or retweeted) the post stored on the task. A fresh cached verdict is returned without re-querying the platform.",
    request_body = TwitterLikeRequest,
    responses(
        (status = 200, description = "Verification result", body = VerifyResponse),
        (status = 400, description = "Missing parameter", body = ErrorResponse),
        (status = 404, description = "Unknown user or task", body = ErrorResponse),
        (status = 422, description = "Task has no target post", body = ErrorResponse),
    )
)]
pub async fn twitter_like(
    State(state): State<AppState>,
    Json(req): Json<TwitterLikeRequest>,
) -> Result<impl IntoResponse, QuestError> {
    let outcome = state
        .verification
        .verify_like(
            &req.user_wallet,
            &req.username,
            TaskId::from_uuid(req.task_id),
        )
        .await?;
    Ok(Json(VerifyResponse::from(outcome)))
}

/// `POST /verify/learn-completion` — Grade a quiz submission.
///
/// Requires a bearer session token from `POST /auth/wallet-login`.
///
/// # Errors
///
/// Returns [`QuestError::Unauthorized`] without a valid bearer token and
/// [`QuestError::InvalidTaskConfig`] for a quiz with no stored answers.
#[utoipa::path(
    post,
    path = "/api/verify/learn-completion",
    tag = "Verification",
    summary = "Submit quiz answers",
    description = "Grades the answers against the task's stored configuration and settles the result. Bearer session token required.",
    request_body = LearnCompletionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Graded result", body = VerifyResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 404, description = "Unknown task", body = ErrorResponse),
        (status = 422, description = "Quiz has no answer configuration", body = ErrorResponse),
    )
)]
pub async fn learn_completion(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LearnCompletionRequest>,
) -> Result<impl IntoResponse, QuestError> {
    let token = bearer_token(&headers)?;
    let user = state.identity.user_from_token(token).await?;
    let outcome = state
        .verification
        .verify_quiz(&user, TaskId::from_uuid(req.task_id), &req.answers)
        .await?;
    Ok(Json(VerifyResponse::from(outcome)))
}

/// `POST /verify/discord-join` — Verify Discord guild membership.
///
/// # Errors
///
/// Returns [`QuestError`] for missing parameters, an unknown task, or an
/// OAuth/provider failure.
#[utoipa::path(
    post,
    path = "/api/verify/discord-join",
    tag = "Verification",
    summary = "Verify Discord membership",
    description = "Exchanges the OAuth code and checks guild membership. Membership is reported even without a wallet; XP settles only for a known wallet user. Never cached.",
    request_body = DiscordJoinRequest,
    responses(
        (status = 200, description = "Membership result", body = DiscordJoinResponse),
        (status = 400, description = "Missing parameter", body = ErrorResponse),
        (status = 404, description = "Unknown task", body = ErrorResponse),
    )
)]
pub async fn discord_join(
    State(state): State<AppState>,
    Json(req): Json<DiscordJoinRequest>,
) -> Result<impl IntoResponse, QuestError> {
    let outcome = state
        .verification
        .verify_discord_join(
            &req.code,
            &req.guild_id,
            TaskId::from_uuid(req.task_id),
            req.user_wallet.as_deref(),
        )
        .await?;
    Ok(Json(DiscordJoinResponse::from(outcome)))
}

/// `POST /verify/telegram-join` — Verify Telegram group membership.
///
/// # Errors
///
/// Returns [`QuestError::Unauthorized`] for a payload that fails the
/// login-widget signature check, plus the usual not-found and provider
/// failures.
#[utoipa::path(
    post,
    path = "/api/verify/telegram-join",
    tag = "Verification",
    summary = "Verify Telegram membership",
    description = "Validates the signed login-widget payload, checks membership of the task's group, and settles the result. Never cached.",
    responses(
        (status = 200, description = "Membership result", body = VerifyResponse),
        (status = 400, description = "Payload has no user id", body = ErrorResponse),
        (status = 401, description = "Payload failed signature check", body = ErrorResponse),
        (status = 404, description = "Unknown user or task", body = ErrorResponse),
    )
)]
pub async fn telegram_join(
    State(state): State<AppState>,
    Json(req): Json<TelegramJoinRequest>,
) -> Result<impl IntoResponse, QuestError> {
    let outcome = state
        .verification
        .verify_telegram_join(
            &req.user_wallet,
            TaskId::from_uuid(req.task_id),
            &req.telegram_data,
        )
        .await?;
    Ok(Json(VerifyResponse::from(outcome)))
}

/// Verification routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/verify/manual-completion", post(manual_completion))
        .route("/verify/twitter-follow", post(twitter_follow))
        .route("/verify/twitter-like", post(twitter_like))
        .route("/verify/learn-completion", post(learn_completion))
        .route("/verify/discord-join", post(discord_join))
        .route("/verify/telegram-join", post(telegram_join))
}

/// Extracts the bearer token from the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, QuestError> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| QuestError::Unauthorized("missing bearer token".to_string()))
}
