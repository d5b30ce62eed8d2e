//! Quest catalog endpoint handlers.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{QuestDetailResponse, QuestDto, TaskDto};
use crate::app_state::AppState;
use crate::domain::QuestId;
use crate::error::{ErrorResponse, QuestError};

/// `GET /quests` — List active quests.
///
/// # Errors
///
/// Returns [`QuestError::Persistence`] on store failure.
#[utoipa::path(
    get,
    path = "/api/quests",
    tag = "Quests",
    summary = "List active quests",
    description = "Returns every quest currently open for task completion, newest first.",
    responses(
        (status = 200, description = "Active quest catalog", body = Vec<QuestDto>),
    )
)]
pub async fn list_quests(State(state): State<AppState>) -> Result<impl IntoResponse, QuestError> {
    let quests = state.store.list_active_quests().await?;
    let body: Vec<QuestDto> = quests.into_iter().map(QuestDto::from).collect();
    Ok(Json(body))
}

/// `GET /quests/:id` — Get a quest with its tasks.
///
/// # Errors
///
/// Returns [`QuestError::QuestNotFound`] for an unknown quest ID.
#[utoipa::path(
    get,
    path = "/api/quests/{id}",
    tag = "Quests",
    summary = "Get quest detail",
    description = "Returns the quest and its tasks in display order. Quiz answer configuration is never included.",
    params(
        ("id" = uuid::Uuid, Path, description = "Quest UUID"),
    ),
    responses(
        (status = 200, description = "Quest with tasks", body = QuestDetailResponse),
        (status = 404, description = "Quest not found", body = ErrorResponse),
    )
)]
pub async fn get_quest(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, QuestError> {
    let quest_id = QuestId::from_uuid(id);
    let quest = state
        .store
        .get_quest(quest_id)
        .await?
        .ok_or(QuestError::QuestNotFound(id))?;
    let tasks = state.store.list_quest_tasks(quest_id).await?;

    Ok(Json(QuestDetailResponse {
        quest: QuestDto::from(quest),
        tasks: tasks.into_iter().map(TaskDto::from).collect(),
    }))
}

/// Quest routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/quests", get(list_quests))
        .route("/quests/{id}", get(get_quest))
}
