//! Stats, achievements and level listings.
//!
//! Renderers return strings so commands can print them and tests can
//! inspect them.

use crate::ui::{self, colors, symbols};
use mathtrainer_core::achievements::{self, ACHIEVEMENTS};
use mathtrainer_core::levels::{self, LEVELS};
use mathtrainer_core::round::RoundSummary;
use mathtrainer_core::{map_skill, Achievement, PlayerStats};

const KEY_WIDTH: usize = 16;

pub fn render_stats(stats: &PlayerStats) -> String {
    let skill = map_skill(stats.total_score);
    let mut lines = Vec::new();

    lines.push(ui::kv("player", &stats.player_name, KEY_WIDTH));
    lines.push(ui::kv("avatar", &stats.avatar_id.to_string(), KEY_WIDTH));
    lines.push(ui::kv("score", &stats.total_score.to_string(), KEY_WIDTH));
    lines.push(ui::kv(
        "skill",
        &format!("{} (tier {})", skill.current.name, skill.current.ordinal),
        KEY_WIDTH,
    ));

    let progress = match skill.next {
        Some(next) => format!(
            "{} {:.0}%  {} / {} to {}",
            ui::progress_bar(skill.progress_pct, 20),
            skill.progress_pct,
            stats.total_score,
            next.min_score,
            next.name
        ),
        None => format!("{} max tier", ui::progress_bar(100.0, 20)),
    };
    lines.push(ui::kv("", &progress, KEY_WIDTH));

    lines.push(ui::kv("solved", &stats.total_solved.to_string(), KEY_WIDTH));
    lines.push(ui::kv(
        "streak",
        &format!("{} (best {})", stats.current_streak, stats.best_streak),
        KEY_WIDTH,
    ));
    lines.push(ui::kv("quick answers", &stats.quick_answers.to_string(), KEY_WIDTH));
    lines.push(ui::kv("levels done", &join_ids(stats.levels_completed.iter()), KEY_WIDTH));
    lines.push(ui::kv("perfect levels", &join_ids(stats.perfect_levels.iter()), KEY_WIDTH));

    let badges = achievements::format_badges(stats, 5);
    if !badges.is_empty() {
        lines.push(ui::kv("badges", &badges, KEY_WIDTH));
    }
    lines.join("\n")
}

pub fn render_achievements(stats: &PlayerStats) -> String {
    let unlocked = stats.unlocked_achievements.len();
    let mut lines = vec![format!(
        "{}Achievements {}/{}{}",
        colors::BOLD,
        unlocked,
        ACHIEVEMENTS.len(),
        colors::RESET
    )];

    for a in ACHIEVEMENTS {
        let progress = achievements::progress(stats, a.id);
        let (mark, color) = if stats.unlocked_achievements.contains(&a.id) {
            (symbols::OK, colors::OK)
        } else {
            (symbols::LOCKED, colors::DIM)
        };
        lines.push(format!(
            "  {}{}{} {:6} {:16} {:>3}/{:<3} {}",
            color,
            mark,
            colors::RESET,
            a.badge,
            a.title,
            progress.current,
            progress.max,
            a.description
        ));
    }
    lines.join("\n")
}

pub fn render_levels() -> String {
    LEVELS
        .iter()
        .map(|l| {
            let bounds = if l.bounds.is_empty() {
                "single digits".to_string()
            } else {
                l.bounds.iter().map(|b| b.to_string()).collect::<Vec<_>>().join(", ")
            };
            format!("  {} {:8} {:5} {}", l.id, l.name, "*".repeat(l.stars as usize), bounds)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_unlock(achievement: &Achievement) -> String {
    format!("{}{}{}", colors::WARN, achievements::format_unlock(achievement), colors::RESET)
}

pub fn render_summary(summary: &RoundSummary) -> String {
    format!(
        "{}{}{} {} of {} correct, +{} points (total {}) on {}",
        colors::BOLD,
        summary.verdict.title(),
        colors::RESET,
        summary.correct,
        summary.total,
        summary.points_earned,
        summary.total_score,
        levels::level_name(summary.level_id)
    )
}

fn join_ids<'a>(ids: impl Iterator<Item = &'a u8>) -> String {
    let joined = ids.map(|id| id.to_string()).collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_fresh_player() {
        let text = render_stats(&PlayerStats::default());
        assert!(text.contains("Novice"));
        assert!(text.contains("0 / 50 to Beginner"));
        assert!(!text.contains("badges"));
    }

    #[test]
    fn test_stats_max_tier() {
        let stats = PlayerStats { total_score: 9000, ..Default::default() };
        let text = render_stats(&stats);
        assert!(text.contains("Genius"));
        assert!(text.contains("max tier"));
    }

    #[test]
    fn test_achievement_listing() {
        let mut stats = PlayerStats { total_solved: 12, ..Default::default() };
        stats.unlocked_achievements.extend([1, 2]);
        let text = render_achievements(&stats);
        assert!(text.contains("Achievements 2/9"));
        assert!(text.contains(" 12/50 "));
    }

    #[test]
    fn test_levels_listing() {
        let text = render_levels();
        assert!(text.contains("single digits"));
        assert!(text.contains("2000, 5000, 9999"));
    }
}
