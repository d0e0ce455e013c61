//! Progression & scoring engine for the arithmetic trainer.
//!
//! Leaves first: `question` and `scoring` are pure, `skill` maps score to a
//! tier, `stats` holds the pure reducers, `achievements` evaluates unlocks,
//! `progress` is the persisted session service, `notifications` serialises
//! unlock display, and `sync` mirrors profile fields remotely.

pub mod achievements;
pub mod clock;
pub mod config;
pub mod error;
pub mod levels;
pub mod notifications;
pub mod progress;
pub mod question;
pub mod round;
pub mod scoring;
pub mod skill;
pub mod stats;
pub mod storage;
pub mod sync;

pub use achievements::{Achievement, AchievementId, AchievementProgress, ACHIEVEMENTS};
pub use clock::ResponseClock;
pub use config::TrainerConfig;
pub use error::{Result, TrainerError};
pub use levels::{Level, LevelId, LEVELS, MAX_RANGE, MIXED_RANGE, ROUND_SIZE};
pub use notifications::{DisplayState, NotificationQueue};
pub use progress::ProgressStore;
pub use question::{generate, generate_with, Operator, Question};
pub use round::{AnswerOutcome, Round, RoundSummary, Verdict};
pub use scoring::score;
pub use skill::{map_skill, SkillProgress, SkillTier, SKILL_TIERS};
pub use stats::PlayerStats;
pub use storage::{FileStore, KeyValueStore, MemoryStore, STATS_KEY};
pub use sync::{HttpRemoteSync, RemoteSync, SyncWorker, UserPatch};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
