//! Question generator with per-level difficulty curves.
//!
//! Each level samples its first operand from a band scaled to the active
//! magnitude bound and its second operand from a narrower band. Subtraction
//! never produces a negative result: operands are swapped after sampling.

use crate::levels::{bounds_for, LevelId, MAX_RANGE, MIXED_RANGE};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic operator of a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "−",
        }
    }

    pub fn apply(&self, a: i32, b: i32) -> i32 {
        match self {
            Operator::Add => a + b,
            Operator::Sub => a - b,
        }
    }
}

/// One arithmetic question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub operand_a: i32,
    pub operand_b: i32,
    pub operator: Operator,
    pub expected: i32,
}

impl Question {
    /// Build a question, swapping operands of a subtraction when needed
    pub fn new(a: i32, b: i32, operator: Operator) -> Self {
        let (operand_a, operand_b) = if operator == Operator::Sub && a < b {
            (b, a)
        } else {
            (a, b)
        };
        Self {
            operand_a,
            operand_b,
            operator,
            expected: operator.apply(operand_a, operand_b),
        }
    }

    pub fn is_correct(&self, answer: i32) -> bool {
        answer == self.expected
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.operand_a, self.operator.symbol(), self.operand_b)
    }
}

/// Generate a question using the thread-local RNG
pub fn generate(level_id: LevelId, range_selector: i32) -> Question {
    generate_with(&mut rand::thread_rng(), level_id, range_selector)
}

/// Generate a question from the given RNG.
///
/// `range_selector == -1` picks one of the level's bounds uniformly; other
/// selectors are capped at `MAX_RANGE`. Levels outside 1..=6 sample like
/// level 1.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, level_id: LevelId, range_selector: i32) -> Question {
    let range = resolve_range(rng, level_id, range_selector);

    let (a, b) = match level_id {
        2 => (
            sample(rng, scaled_ceil(range, 0.4).max(10), range),
            sample(rng, 1, 9),
        ),
        3 => (sample(rng, 10, range), sample(rng, 10, scaled_floor(range, 0.75))),
        4 => (sample(rng, 100, range), sample(rng, 10, scaled_floor(range, 0.4))),
        5 => (sample(rng, 100, range), sample(rng, 50, scaled_floor(range, 0.6))),
        6 => (sample(rng, 1000, range), sample(rng, 100, scaled_floor(range, 0.35))),
        _ => (sample(rng, 1, 9), sample(rng, 1, 9)),
    };

    let operator = if rng.gen_bool(0.5) { Operator::Add } else { Operator::Sub };
    Question::new(a, b, operator)
}

fn resolve_range<R: Rng + ?Sized>(rng: &mut R, level_id: LevelId, range_selector: i32) -> i32 {
    if range_selector != MIXED_RANGE {
        return range_selector.min(MAX_RANGE);
    }
    let bounds = bounds_for(level_id);
    if bounds.is_empty() {
        range_selector
    } else {
        bounds[rng.gen_range(0..bounds.len())]
    }
}

/// Uniform integer in `[lo, hi]`; an inverted interval collapses to `lo`
fn sample<R: Rng + ?Sized>(rng: &mut R, lo: i32, hi: i32) -> i32 {
    rng.gen_range(lo..=hi.max(lo))
}

fn scaled_floor(range: i32, factor: f64) -> i32 {
    (range as f64 * factor).floor() as i32
}

fn scaled_ceil(range: i32, factor: f64) -> i32 {
    (range as f64 * factor).ceil() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn many(level: LevelId, range: i32) -> Vec<Question> {
        let mut rng = StdRng::seed_from_u64((level as u64 * 7919).wrapping_add(range as u64));
        (0..2000).map(|_| generate_with(&mut rng, level, range)).collect()
    }

    #[test]
    fn test_subtraction_never_negative() {
        for level in 1..=6 {
            for q in many(level, -1) {
                if q.operator == Operator::Sub {
                    assert!(q.operand_a >= q.operand_b, "{:?}", q);
                    assert!(q.expected >= 0);
                }
            }
        }
    }

    #[test]
    fn test_expected_matches_operator() {
        for q in many(4, 500) {
            assert_eq!(q.expected, q.operator.apply(q.operand_a, q.operand_b));
        }
    }

    #[test]
    fn test_level_one_single_digits() {
        for q in many(1, 9) {
            assert!((1..=9).contains(&q.operand_a));
            assert!((1..=9).contains(&q.operand_b));
        }
    }

    #[test]
    fn test_level_two_bands() {
        // R = 50: first operand in [20, 50], second in [1, 9]
        for q in many(2, 50) {
            let (big, small) = (q.operand_a.max(q.operand_b), q.operand_a.min(q.operand_b));
            assert!((20..=50).contains(&big), "{:?}", q);
            assert!((1..=9).contains(&small), "{:?}", q);
        }
    }

    #[test]
    fn test_level_six_bands() {
        for q in many(6, 2000) {
            let (big, small) = (q.operand_a.max(q.operand_b), q.operand_a.min(q.operand_b));
            assert!((1000..=2000).contains(&big), "{:?}", q);
            assert!((100..=700).contains(&small), "{:?}", q);
        }
    }

    #[test]
    fn test_mixed_stays_within_largest_bound() {
        for q in many(3, -1) {
            assert!(q.operand_a.max(q.operand_b) <= 99);
            assert!(q.operand_a.min(q.operand_b) >= 10);
        }
    }

    #[test]
    fn test_both_operators_appear() {
        let qs = many(1, 9);
        assert!(qs.iter().any(|q| q.operator == Operator::Add));
        assert!(qs.iter().any(|q| q.operator == Operator::Sub));
    }

    #[test]
    fn test_undefined_level_falls_back() {
        for q in many(9, 1234) {
            assert!((1..=9).contains(&q.operand_a));
            assert!((1..=9).contains(&q.operand_b));
        }
    }

    #[test]
    fn test_degenerate_range_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(1);
        let q = generate_with(&mut rng, 3, 5);
        assert_eq!(q.expected, q.operator.apply(q.operand_a, q.operand_b));
    }

    #[test]
    fn test_huge_range_is_capped() {
        let mut rng = StdRng::seed_from_u64(3);
        for level in [2, 6] {
            for _ in 0..500 {
                let q = generate_with(&mut rng, level, i32::MAX);
                assert!(q.operand_a.max(q.operand_b) <= MAX_RANGE, "{:?}", q);
                assert!(q.expected >= 0);
                assert_eq!(q.expected, q.operator.apply(q.operand_a, q.operand_b));
            }
        }
    }

    #[test]
    fn test_swap_on_construction() {
        let q = Question::new(3, 8, Operator::Sub);
        assert_eq!((q.operand_a, q.operand_b, q.expected), (8, 3, 5));
        assert_eq!(q.to_string(), "8 − 3");
        assert!(q.is_correct(5));
    }
}
