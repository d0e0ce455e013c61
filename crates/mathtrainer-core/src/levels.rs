//! Level catalog: names and predefined magnitude bounds per level.

use serde::Serialize;

/// Level identifier (1..=6 are defined)
pub type LevelId = u8;

/// Questions per round
pub const ROUND_SIZE: usize = 5;

/// Range selector meaning "pick one of the level's bounds per question"
pub const MIXED_RANGE: i32 = -1;

/// Largest accepted magnitude bound; larger selectors are clamped to it
pub const MAX_RANGE: i32 = 99_999;

/// Bound implied for level 1, which has no range picker
pub const BASICS_BOUND: i32 = 9;

/// Static description of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Level {
    pub id: LevelId,
    pub name: &'static str,
    /// Difficulty stars shown next to the level (1-5)
    pub stars: u8,
    /// Predefined magnitude bounds; empty means no range picker
    pub bounds: &'static [i32],
}

/// All defined levels, ascending by id
pub const LEVELS: &[Level] = &[
    Level { id: 1, name: "Basics", stars: 1, bounds: &[] },
    Level { id: 2, name: "Easy", stars: 2, bounds: &[10, 15, 20, 30, 50, 99] },
    Level { id: 3, name: "Medium", stars: 3, bounds: &[50, 99] },
    Level { id: 4, name: "Hard", stars: 4, bounds: &[200, 500, 999] },
    Level { id: 5, name: "Expert", stars: 5, bounds: &[200, 500, 999] },
    Level { id: 6, name: "Genius", stars: 5, bounds: &[2000, 5000, 9999] },
];

/// Look up a defined level
pub fn level(id: LevelId) -> Option<&'static Level> {
    LEVELS.iter().find(|l| l.id == id)
}

/// Display name for a level id, "Level" for undefined ids
pub fn level_name(id: LevelId) -> &'static str {
    level(id).map(|l| l.name).unwrap_or("Level")
}

/// Bounds for a level id; undefined ids have none
pub fn bounds_for(id: LevelId) -> &'static [i32] {
    level(id).map(|l| l.bounds).unwrap_or(&[])
}

/// Default selector used when a caller does not pick a range
pub fn default_range(id: LevelId) -> i32 {
    match bounds_for(id) {
        [] => BASICS_BOUND,
        bounds => bounds[bounds.len() - 1],
    }
}

/// Human label for a range selector ("mixed", "up to 99")
pub fn range_label(range: i32) -> String {
    if range == MIXED_RANGE {
        "mixed".to_string()
    } else {
        format!("up to {}", range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_ascending() {
        let ids: Vec<_> = LEVELS.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_level_one_has_no_bounds() {
        assert!(bounds_for(1).is_empty());
        assert_eq!(default_range(1), 9);
    }

    #[test]
    fn test_undefined_level() {
        assert!(level(7).is_none());
        assert_eq!(level_name(0), "Level");
        assert!(bounds_for(42).is_empty());
    }

    #[test]
    fn test_default_range_is_largest_bound() {
        assert_eq!(default_range(2), 99);
        assert_eq!(default_range(6), 9999);
    }

    #[test]
    fn test_range_label() {
        assert_eq!(range_label(-1), "mixed");
        assert_eq!(range_label(500), "up to 500");
    }
}
