//! Time-based scoring.
//!
//! Points grow with the level and shrink with response latency:
//!
//! | latency | points             |
//! |---------|--------------------|
//! | ≤ 3s    | base + 6           |
//! | ≤ 6s    | base + 3           |
//! | ≤ 12s   | base               |
//! | > 12s   | max(base − 4, 4)   |
//!
//! where `base = (level − 1) × 4 + 10`.

use crate::levels::LevelId;

/// Correct answers at or below this latency count as quick
pub const QUICK_THRESHOLD_SECS: f64 = 3.0;

/// Latency above which the question timer is shown as overdue
pub const OVERDUE_SECS: u64 = 20;

/// Lowest award for a correct answer
pub const MIN_POINTS: u32 = 4;

/// Base points for a level before the latency bonus
pub fn base_points(level_id: LevelId) -> u32 {
    (level_id.max(1) as u32 - 1) * 4 + 10
}

/// Points for a correct answer given after `response_secs`
pub fn score(response_secs: f64, level_id: LevelId) -> u32 {
    let base = base_points(level_id);
    if response_secs <= 3.0 {
        base + 6
    } else if response_secs <= 6.0 {
        base + 3
    } else if response_secs <= 12.0 {
        base
    } else {
        base.saturating_sub(4).max(MIN_POINTS)
    }
}

pub fn is_quick(response_secs: f64) -> bool {
    response_secs <= QUICK_THRESHOLD_SECS
}

/// Format a whole-second timer as `MM:SS`
pub fn format_timer(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_answer_level_one() {
        assert_eq!(score(2.5, 1), 16);
    }

    #[test]
    fn test_plain_answer_level_three() {
        assert_eq!(score(9.0, 3), 18);
    }

    #[test]
    fn test_slow_answer_level_one() {
        assert_eq!(score(20.0, 1), 6);
    }

    #[test]
    fn test_tier_edges() {
        assert_eq!(score(3.0, 1), 16);
        assert_eq!(score(3.01, 1), 13);
        assert_eq!(score(6.0, 1), 13);
        assert_eq!(score(12.0, 1), 10);
        assert_eq!(score(12.5, 1), 6);
    }

    #[test]
    fn test_higher_levels_pay_more() {
        assert_eq!(base_points(6), 30);
        assert_eq!(score(0.0, 6), 36);
        assert_eq!(score(100.0, 6), 26);
    }

    #[test]
    fn test_level_zero_clamped() {
        assert_eq!(score(1.0, 0), score(1.0, 1));
    }

    #[test]
    fn test_is_quick() {
        assert!(is_quick(3.0));
        assert!(!is_quick(3.5));
    }

    #[test]
    fn test_format_timer() {
        assert_eq!(format_timer(0), "00:00");
        assert_eq!(format_timer(75), "01:15");
    }
}
