//! Domain layer: identifiers, catalog entities, submission ledger types,
//! quiz grading, the verification cache entry, and the XP→level policy.

pub mod cache;
pub mod ids;
pub mod level;
pub mod quest;
pub mod quiz;
pub mod submission;
pub mod task;
pub mod user;
pub mod wallet;

pub use cache::{CacheEntry, CacheKey, DEFAULT_CACHE_TTL_SECS};
pub use ids::{QuestId, TaskId, UserId};
pub use level::LevelPolicy;
pub use quest::{Quest, QuestStatus};
pub use quiz::{QuizGrade, QuizSpec};
pub use submission::{
    Settlement, Submission, SubmissionDraft, SubmissionStatus, VerificationMethod,
};
pub use task::{SocialAction, SocialPlatform, Task, TaskKind};
pub use user::User;
pub use wallet::WalletAddress;
