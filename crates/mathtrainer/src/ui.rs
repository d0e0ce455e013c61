//! Terminal UI helpers for consistent output styling.

/// ANSI color codes using true color (24-bit)
pub mod colors {
    pub const HEADER: &str = "\x1b[38;2;216;114;51m";
    pub const OK: &str = "\x1b[38;2;92;167;173m";
    pub const ERR: &str = "\x1b[38;2;232;93;93m";
    pub const WARN: &str = "\x1b[38;2;255;210;51m";
    pub const DIM: &str = "\x1b[38;2;140;140;140m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Unicode symbols
pub mod symbols {
    pub const OK: &str = "✓";
    pub const ERR: &str = "✗";
    pub const LOCKED: &str = "·";
    pub const PROGRESS_FULL: &str = "█";
    pub const PROGRESS_EMPTY: &str = "░";
}

/// Horizontal rule
pub const HR: &str = "────────────────────────────────────────────────────────────";

/// Styled header line with version
pub fn header(name: &str, version: &str) -> String {
    format!(
        "{}{} v{}{}\n{}{}{}",
        colors::HEADER,
        name,
        version,
        colors::RESET,
        colors::DIM,
        HR,
        colors::RESET
    )
}

/// Key-value pair with alignment
pub fn kv(key: &str, value: &str, key_width: usize) -> String {
    format!("  {:width$} {}", key, value, width = key_width)
}

/// Format a progress bar from a 0-100 percentage
pub fn progress_bar(pct: f64, width: usize) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!(
        "[{}{}]",
        symbols::PROGRESS_FULL.repeat(filled),
        symbols::PROGRESS_EMPTY.repeat(empty)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(50.0, 10), "[█████░░░░░]");
        assert_eq!(progress_bar(100.0, 10), "[██████████]");
        assert_eq!(progress_bar(0.0, 10), "[░░░░░░░░░░]");
        assert_eq!(progress_bar(250.0, 4), "[████]");
    }

    #[test]
    fn test_kv_alignment() {
        assert_eq!(kv("score", "10", 8), "  score    10");
    }
}
