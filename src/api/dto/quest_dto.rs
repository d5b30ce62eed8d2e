//! Quest and task catalog DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Quest, Task};

/// A quest as returned by the catalog endpoints.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestDto {
    /// Quest identifier.
    pub id: uuid::Uuid,
    /// Owning project name.
    pub project: String,
    /// Display title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Total XP pool.
    pub total_xp: u64,
    /// Publication state.
    pub status: String,
    /// Cover image URL.
    pub image_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Quest> for QuestDto {
    fn from(quest: Quest) -> Self {
        Self {
            id: *quest.id.as_uuid(),
            project: quest.project,
            title: quest.title,
            description: quest.description,
            total_xp: quest.total_xp,
            status: quest.status.as_str().to_string(),
            image_url: quest.image_url,
            created_at: quest.created_at,
        }
    }
}

/// A task within a quest. The quiz answer configuration is deliberately
/// not exposed here.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Display title.
    pub title: String,
    /// Verification strategy.
    pub task_type: String,
    /// XP awarded on verification.
    pub xp_reward: u32,
    /// Position within the quest.
    pub order_index: i32,
    /// Platform for social tasks.
    pub social_platform: Option<String>,
    /// Action for social tasks.
    pub social_action: Option<String>,
    /// Target URL.
    pub social_url: Option<String>,
    /// Target account handle.
    pub social_username: Option<String>,
    /// Target post ID.
    pub social_post_id: Option<String>,
    /// Quiz passing score, for quiz tasks.
    pub learn_passing_score: Option<u32>,
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self {
            id: *task.id.as_uuid(),
            title: task.title,
            task_type: task.kind.as_str().to_string(),
            xp_reward: task.xp_reward,
            order_index: task.order_index,
            social_platform: task.social_platform.map(|p| p.as_str().to_string()),
            social_action: task.social_action.map(|a| a.as_str().to_string()),
            social_url: task.social_url,
            social_username: task.social_username,
            social_post_id: task.social_post_id,
            learn_passing_score: task.learn_passing_score,
        }
    }
}

/// Response body for `GET /quests/{id}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestDetailResponse {
    /// The quest.
    pub quest: QuestDto,
    /// Its tasks in display order.
    pub tasks: Vec<TaskDto>,
}
