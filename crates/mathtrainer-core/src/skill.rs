//! Skill tiers derived from cumulative score.
//!
//! The tier table is fixed, ascending by `min_score`, and starts at 0, so
//! every score maps to exactly one tier.

use serde::Serialize;

/// A named progression rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillTier {
    pub name: &'static str,
    pub min_score: u64,
    pub color: &'static str,
    pub ordinal: u8,
}

pub const SKILL_TIERS: &[SkillTier] = &[
    SkillTier { name: "Novice", min_score: 0, color: "#9AA0AA", ordinal: 1 },
    SkillTier { name: "Beginner", min_score: 50, color: "#4CAF50", ordinal: 2 },
    SkillTier { name: "Quick Thinker", min_score: 200, color: "#5CA7AD", ordinal: 3 },
    SkillTier { name: "Clever", min_score: 500, color: "#6272A4", ordinal: 4 },
    SkillTier { name: "Master", min_score: 1000, color: "#D87233", ordinal: 5 },
    SkillTier { name: "Pro", min_score: 2000, color: "#E85D5D", ordinal: 6 },
    SkillTier { name: "Expert", min_score: 4000, color: "#9B59B6", ordinal: 7 },
    SkillTier { name: "Genius", min_score: 8000, color: "#D4A017", ordinal: 8 },
];

/// Where a score sits in the tier table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkillProgress {
    pub current: SkillTier,
    pub next: Option<SkillTier>,
    /// Progress towards `next`, 0.0 - 100.0 (100 at the last tier)
    pub progress_pct: f64,
}

impl SkillProgress {
    /// Points still needed to reach the next tier
    pub fn points_to_next(&self, total_score: u64) -> u64 {
        self.next
            .map(|n| n.min_score.saturating_sub(total_score))
            .unwrap_or(0)
    }
}

/// Map a cumulative score to its tier
pub fn map_skill(total_score: u64) -> SkillProgress {
    map_skill_in(SKILL_TIERS, total_score)
}

/// Same as [`map_skill`] over a caller-supplied ascending tier table.
///
/// The table must be non-empty with strictly increasing `min_score`.
pub fn map_skill_in(tiers: &[SkillTier], total_score: u64) -> SkillProgress {
    let idx = tiers
        .iter()
        .rposition(|t| total_score >= t.min_score)
        .unwrap_or(0);
    let current = tiers[idx];
    let next = tiers.get(idx + 1).copied();

    let progress_pct = match next {
        None => 100.0,
        Some(n) => {
            let span = (n.min_score - current.min_score) as f64;
            let gained = total_score.saturating_sub(current.min_score) as f64;
            (gained / span * 100.0).clamp(0.0, 100.0)
        }
    };

    SkillProgress { current, next, progress_pct }
}
