//! Achievement badges and the unlock engine.
//!
//! Predicates are pure and monotonic in the counters they read, so an
//! achievement never re-locks. `evaluate` compares two snapshots and
//! reports ids that became unlocked, ascending by id.

use crate::stats::PlayerStats;
use serde::Serialize;

/// Achievement identifier (1..=9 are defined)
pub type AchievementId = u8;

/// Achievement badge with ASCII symbol and description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: AchievementId,
    /// ASCII badge symbol (e.g., "[10]", "<20>")
    pub badge: &'static str,
    pub title: &'static str,
    /// How to earn it
    pub description: &'static str,
}

impl Achievement {
    const fn new(id: AchievementId, badge: &'static str, title: &'static str, description: &'static str) -> Self {
        Self { id, badge, title, description }
    }
}

/// Progress towards an achievement, `current <= max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementProgress {
    pub current: u64,
    pub max: u64,
}

impl AchievementProgress {
    pub fn is_complete(&self) -> bool {
        self.current >= self.max
    }
}

/// All achievements, ascending by id
pub const ACHIEVEMENTS: &[Achievement] = &[
    // Milestones
    Achievement::new(1, "[1]", "First Example", "Solve your first example"),
    Achievement::new(2, "[10]", "10 Examples", "Solve 10 examples"),
    Achievement::new(3, "[50]", "50 Examples", "Solve 50 examples"),
    Achievement::new(4, "[100]", "100 Examples", "Solve 100 examples"),
    // Streaks
    Achievement::new(5, "<10>", "Flawless 10", "10 correct answers in a row"),
    Achievement::new(6, "<20>", "Streak 20", "20 correct answers in a row"),
    // Speed
    Achievement::new(7, "(<<)", "Quick Mind", "Answer within 3 seconds 10 times"),
    // Levels
    Achievement::new(8, "{1-6}", "Counting Master", "Complete every level from 1 to 6"),
    Achievement::new(9, "{*}", "Impeccable", "Complete a level without a single mistake"),
];

pub fn achievement(id: AchievementId) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Progress of `stats` towards achievement `id`
pub fn progress(stats: &PlayerStats, id: AchievementId) -> AchievementProgress {
    let (value, max) = match id {
        1 => (stats.total_solved, 1),
        2 => (stats.total_solved, 10),
        3 => (stats.total_solved, 50),
        4 => (stats.total_solved, 100),
        5 => (stats.best_streak, 10),
        6 => (stats.best_streak, 20),
        7 => (stats.quick_answers, 10),
        8 => (stats.levels_completed.len() as u64, 6),
        9 => (stats.perfect_levels.len() as u64, 1),
        _ => (0, 1),
    };
    AchievementProgress { current: value.min(max), max }
}

/// Whether the unlock predicate for `id` holds on `stats`
pub fn is_unlocked(id: AchievementId, stats: &PlayerStats) -> bool {
    progress(stats, id).is_complete() && achievement(id).is_some()
}

/// Ids that unlock going from `prev` to `next`, ascending.
///
/// An id qualifies when its predicate holds on `next` and neither snapshot
/// already lists it as unlocked.
pub fn evaluate(prev: &PlayerStats, next: &PlayerStats) -> Vec<AchievementId> {
    ACHIEVEMENTS
        .iter()
        .map(|a| a.id)
        .filter(|id| is_unlocked(*id, next))
        .filter(|id| !prev.unlocked_achievements.contains(id))
        .filter(|id| !next.unlocked_achievements.contains(id))
        .collect()
}

/// Evaluate and merge the new ids into `next`; returns them ascending
pub fn apply(prev: &PlayerStats, next: &mut PlayerStats) -> Vec<AchievementId> {
    let unlocked = evaluate(prev, next);
    next.unlocked_achievements.extend(prev.unlocked_achievements.iter().copied());
    next.unlocked_achievements.extend(unlocked.iter().copied());
    unlocked
}

/// Format unlocked badges for a one-line summary (ASCII style)
pub fn format_badges(stats: &PlayerStats, max_display: usize) -> String {
    let unlocked: Vec<_> = ACHIEVEMENTS
        .iter()
        .filter(|a| stats.unlocked_achievements.contains(&a.id))
        .collect();
    if unlocked.is_empty() {
        return String::new();
    }

    let badges = unlocked
        .iter()
        .take(max_display)
        .map(|a| a.badge)
        .collect::<Vec<_>>()
        .join(" ");

    if unlocked.len() > max_display {
        format!("{} +{} more", badges, unlocked.len() - max_display)
    } else {
        badges
    }
}

/// Format a single achievement for notification (ASCII style)
pub fn format_unlock(ach: &Achievement) -> String {
    format!("{} Achievement unlocked: {} - {}", ach.badge, ach.title, ach.description)
}
