//! Quest catalog entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::QuestId;

/// Publication state of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    /// Not yet visible to participants.
    Draft,
    /// Open for task completion.
    Active,
    /// Finished.
    Completed,
    /// Temporarily hidden.
    Paused,
}

impl QuestStatus {
    /// Returns the canonical column value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }

    /// Parses a stored `status` value. Unknown strings map to `Draft`
    /// so they never leak into the active catalog.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "active" => Self::Active,
            "completed" => Self::Completed,
            "paused" => Self::Paused,
            _ => Self::Draft,
        }
    }
}

/// A collection of tasks offered by a project, worth a total XP pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    /// Quest identifier.
    pub id: QuestId,
    /// Owning project name.
    pub project: String,
    /// Display title.
    pub title: String,
    /// Description shown on the quest page.
    pub description: String,
    /// Total XP pool across the quest's tasks.
    pub total_xp: u64,
    /// Publication state.
    pub status: QuestStatus,
    /// Cover image URL.
    pub image_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_parses_as_draft() {
        assert_eq!(QuestStatus::parse("active"), QuestStatus::Active);
        assert_eq!(QuestStatus::parse("archived"), QuestStatus::Draft);
    }
}
