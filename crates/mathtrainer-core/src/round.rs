//! A round of `ROUND_SIZE` questions at one level.
//!
//! The round owns question sequencing and the running score; every answer
//! is forwarded to the `ProgressStore`, which persists it and reports any
//! achievements it unlocked. Streaks carry over between rounds.

use crate::achievements::AchievementId;
use crate::levels::{LevelId, ROUND_SIZE};
use crate::progress::ProgressStore;
use crate::question::{generate_with, Question};
use crate::scoring;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

/// End-of-round verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// Every answer correct
    Perfect,
    /// At least 3 correct
    Great,
    KeepGoing,
}

impl Verdict {
    pub fn from_correct(correct: usize) -> Self {
        if correct == ROUND_SIZE {
            Verdict::Perfect
        } else if correct >= 3 {
            Verdict::Great
        } else {
            Verdict::KeepGoing
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Verdict::Perfect => "Perfect!",
            Verdict::Great => "Great job!",
            Verdict::KeepGoing => "Keep going!",
        }
    }
}

/// Result of submitting one answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub expected: i32,
    pub points: u32,
    pub quick: bool,
    /// Achievements unlocked by this answer (and the round end, if it was the last)
    pub unlocked: Vec<AchievementId>,
    pub round_finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub level_id: LevelId,
    pub correct: usize,
    pub total: usize,
    pub points_earned: u64,
    pub total_score: u64,
    pub perfect: bool,
    pub verdict: Verdict,
}

pub struct Round {
    level_id: LevelId,
    range: i32,
    rng: StdRng,
    question: Question,
    index: usize,
    correct: usize,
    perfect: bool,
    score_at_start: u64,
    score: u64,
    finished: bool,
}

impl Round {
    /// Start a round continuing from the player's current score
    pub fn start(level_id: LevelId, range: i32, progress: &ProgressStore) -> Self {
        Self::with_rng(level_id, range, progress.stats().total_score, StdRng::from_entropy())
    }

    /// Start a round with a fixed RNG (deterministic question sequence)
    pub fn with_rng(level_id: LevelId, range: i32, score: u64, mut rng: StdRng) -> Self {
        let question = generate_with(&mut rng, level_id, range);
        Self {
            level_id,
            range,
            rng,
            question,
            index: 0,
            correct: 0,
            perfect: true,
            score_at_start: score,
            score,
            finished: false,
        }
    }

    pub fn level_id(&self) -> LevelId {
        self.level_id
    }

    pub fn range(&self) -> i32 {
        self.range
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Zero-based position of the current question
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Submit an answer to the current question. Returns `None` once the
    /// round is finished.
    pub fn submit(&mut self, answer: i32, response_secs: f64, progress: &mut ProgressStore) -> Option<AnswerOutcome> {
        if self.finished {
            return None;
        }

        let expected = self.question.expected;
        let correct = self.question.is_correct(answer);
        let quick = correct && scoring::is_quick(response_secs);
        let mut points = 0;
        let mut unlocked = Vec::new();

        if correct {
            points = scoring::score(response_secs, self.level_id);
            self.score += u64::from(points);
            self.correct += 1;
            unlocked.extend(progress.record_correct_answer(quick));
            unlocked.extend(progress.update_score(self.score));
        } else {
            self.perfect = false;
            unlocked.extend(progress.record_wrong_answer());
        }
        debug!(
            "q{} {} = {} answered {} ({}s, +{})",
            self.index + 1,
            self.question,
            expected,
            answer,
            response_secs,
            points
        );

        if self.index + 1 == ROUND_SIZE {
            self.finished = true;
            unlocked.extend(progress.record_round_complete(self.level_id, self.perfect));
        } else {
            self.index += 1;
            self.question = generate_with(&mut self.rng, self.level_id, self.range);
        }

        Some(AnswerOutcome {
            correct,
            expected,
            points,
            quick,
            unlocked,
            round_finished: self.finished,
        })
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            level_id: self.level_id,
            correct: self.correct,
            total: ROUND_SIZE,
            points_earned: self.score - self.score_at_start,
            total_score: self.score,
            perfect: self.finished && self.perfect,
            verdict: Verdict::from_correct(self.correct),
        }
    }

    /// Begin a new round at the same level, keeping the running score
    pub fn restart(&mut self) {
        self.index = 0;
        self.correct = 0;
        self.perfect = true;
        self.finished = false;
        self.score_at_start = self.score;
        self.question = generate_with(&mut self.rng, self.level_id, self.range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn fresh() -> (Round, ProgressStore) {
        let progress = ProgressStore::open(Box::new(MemoryStore::new()));
        let round = Round::with_rng(1, 9, 0, StdRng::seed_from_u64(42));
        (round, progress)
    }

    fn answer_right(round: &mut Round, secs: f64, progress: &mut ProgressStore) -> AnswerOutcome {
        let expected = round.question().expected;
        round.submit(expected, secs, progress).unwrap()
    }

    #[test]
    fn test_perfect_round() {
        let (mut round, mut progress) = fresh();
        let first = answer_right(&mut round, 2.0, &mut progress);
        assert_eq!(first.points, 16);
        assert!(first.quick);
        assert_eq!(first.unlocked, vec![1]);

        for _ in 0..4 {
            answer_right(&mut round, 8.0, &mut progress);
        }
        assert!(round.is_finished());

        let summary = round.summary();
        assert_eq!(summary.correct, 5);
        assert_eq!(summary.points_earned, 16 + 4 * 10);
        assert_eq!(summary.verdict, Verdict::Perfect);
        assert!(summary.perfect);

        let stats = progress.stats();
        assert_eq!(stats.total_score, 56);
        assert_eq!(stats.quick_answers, 1);
        assert!(stats.perfect_levels.contains(&1));
        assert!(stats.unlocked_achievements.contains(&9));
    }

    #[test]
    fn test_wrong_answer_breaks_perfection() {
        let (mut round, mut progress) = fresh();
        let wrong = round.question().expected + 1;
        let outcome = round.submit(wrong, 1.0, &mut progress).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.points, 0);
        assert!(!outcome.quick);

        for _ in 0..4 {
            answer_right(&mut round, 1.0, &mut progress);
        }
        let summary = round.summary();
        assert_eq!(summary.verdict, Verdict::Great);
        assert!(!summary.perfect);
        assert!(progress.stats().levels_completed.contains(&1));
        assert!(progress.stats().perfect_levels.is_empty());
    }

    #[test]
    fn test_last_answer_reports_round_unlocks() {
        let (mut round, mut progress) = fresh();
        for _ in 0..4 {
            answer_right(&mut round, 5.0, &mut progress);
        }
        let last = answer_right(&mut round, 5.0, &mut progress);
        assert!(last.round_finished);
        assert!(last.unlocked.contains(&9));
        assert!(round.submit(0, 1.0, &mut progress).is_none());
    }

    #[test]
    fn test_restart_keeps_score_and_streak() {
        let (mut round, mut progress) = fresh();
        for _ in 0..5 {
            answer_right(&mut round, 1.0, &mut progress);
        }
        round.restart();
        assert_eq!(round.index(), 0);
        assert!(!round.is_finished());
        assert_eq!(round.summary().points_earned, 0);
        assert_eq!(round.score(), 80);

        answer_right(&mut round, 1.0, &mut progress);
        assert_eq!(progress.stats().current_streak, 6);
    }

    #[test]
    fn test_verdicts() {
        assert_eq!(Verdict::from_correct(5), Verdict::Perfect);
        assert_eq!(Verdict::from_correct(3), Verdict::Great);
        assert_eq!(Verdict::from_correct(2), Verdict::KeepGoing);
    }
}
