//! Durable player statistics and the pure reducers over them.
//!
//! Every reducer takes the current snapshot by reference and returns a new
//! one. Counters only grow; `current_streak` is the single field that drops
//! (to 0 on a wrong answer). Achievement ids are merged by the engine in
//! `achievements`, never here.
//!
//! The JSON layout uses camelCase keys and tolerates missing fields, so
//! older records load with defaults filled in.

use crate::achievements::AchievementId;
use crate::levels::LevelId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Name given to a fresh profile
pub const DEFAULT_PLAYER_NAME: &str = "Математик";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStats {
    /// All answers ever given, correct or not
    pub total_solved: u64,
    /// Consecutive correct answers since the last miss
    pub current_streak: u64,
    pub best_streak: u64,
    /// Correct answers within the quick threshold
    pub quick_answers: u64,
    /// Levels with at least one finished round
    pub levels_completed: BTreeSet<LevelId>,
    /// Levels finished with no wrong answer in the round
    pub perfect_levels: BTreeSet<LevelId>,
    pub total_score: u64,
    pub has_played: bool,
    pub player_name: String,
    pub unlocked_achievements: BTreeSet<AchievementId>,
    pub avatar_id: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            total_solved: 0,
            current_streak: 0,
            best_streak: 0,
            quick_answers: 0,
            levels_completed: BTreeSet::new(),
            perfect_levels: BTreeSet::new(),
            total_score: 0,
            has_played: false,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            unlocked_achievements: BTreeSet::new(),
            avatar_id: 0,
        }
    }
}

impl PlayerStats {
    pub fn record_correct_answer(&self, is_quick: bool) -> Self {
        let current_streak = self.current_streak + 1;
        Self {
            total_solved: self.total_solved + 1,
            current_streak,
            best_streak: self.best_streak.max(current_streak),
            quick_answers: self.quick_answers + u64::from(is_quick),
            has_played: true,
            ..self.clone()
        }
    }

    pub fn record_wrong_answer(&self) -> Self {
        Self {
            total_solved: self.total_solved + 1,
            current_streak: 0,
            has_played: true,
            ..self.clone()
        }
    }

    /// Mark a level as completed (and perfect, if no answer was wrong)
    pub fn record_round_complete(&self, level_id: LevelId, is_perfect: bool) -> Self {
        let mut next = self.clone();
        next.levels_completed.insert(level_id);
        if is_perfect {
            next.perfect_levels.insert(level_id);
        }
        next
    }

    pub fn update_score(&self, new_score: u64) -> Self {
        Self { total_score: new_score, ..self.clone() }
    }

    pub fn update_name(&self, name: &str) -> Self {
        Self { player_name: name.to_string(), ..self.clone() }
    }

    pub fn update_avatar(&self, avatar_id: u32) -> Self {
        Self { avatar_id, ..self.clone() }
    }

    /// Number of distinct levels with a finished round
    pub fn distinct_levels_completed(&self) -> usize {
        self.levels_completed.len()
    }
}
