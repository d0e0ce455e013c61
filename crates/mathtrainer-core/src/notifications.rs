//! Achievement notification queue.
//!
//! At most one notification is visible at a time. The queue is an explicit
//! state machine (`Idle` / `Showing { id, expires_at }`) over a FIFO backlog,
//! driven by three transitions: `enqueue`, `tick` (expiry) and `dismiss`.
//! Callers pass the current `Instant`, so there is a single logical timer and
//! nothing ever blocks.

use crate::achievements::AchievementId;
use crate::config::DEFAULT_NOTIFICATION_MS;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Idle,
    Showing { id: AchievementId, expires_at: Instant },
}

#[derive(Debug)]
pub struct NotificationQueue {
    backlog: VecDeque<AchievementId>,
    state: DisplayState,
    display_for: Duration,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_NOTIFICATION_MS))
    }
}

impl NotificationQueue {
    pub fn new(display_for: Duration) -> Self {
        Self {
            backlog: VecDeque::new(),
            state: DisplayState::Idle,
            display_for,
        }
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Id currently on screen
    pub fn current(&self) -> Option<AchievementId> {
        match self.state {
            DisplayState::Showing { id, .. } => Some(id),
            DisplayState::Idle => None,
        }
    }

    /// Ids waiting behind the visible one
    pub fn pending(&self) -> usize {
        self.backlog.len()
    }

    pub fn is_idle(&self) -> bool {
        self.state == DisplayState::Idle && self.backlog.is_empty()
    }

    /// When the visible notification expires
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            DisplayState::Showing { expires_at, .. } => Some(expires_at),
            DisplayState::Idle => None,
        }
    }

    /// Append a batch (shown ascending by id). Returns the id that became
    /// visible, if the queue was idle.
    pub fn enqueue(&mut self, ids: &[AchievementId], now: Instant) -> Option<AchievementId> {
        let mut batch = ids.to_vec();
        batch.sort_unstable();
        self.backlog.extend(batch);
        self.show_next(now)
    }

    /// Expire the visible notification if its time is up. Returns the id
    /// that became visible in its place.
    pub fn tick(&mut self, now: Instant) -> Option<AchievementId> {
        match self.state {
            DisplayState::Showing { id, expires_at } if now >= expires_at => {
                debug!("notification {} expired", id);
                self.state = DisplayState::Idle;
                self.show_next(now)
            }
            DisplayState::Showing { .. } => None,
            DisplayState::Idle => self.show_next(now),
        }
    }

    /// Dismiss `id` early. Has no effect unless `id` is the visible one, so
    /// repeating a dismissal never skips a later notification.
    pub fn dismiss(&mut self, id: AchievementId, now: Instant) -> Option<AchievementId> {
        match self.state {
            DisplayState::Showing { id: shown, .. } if shown == id => {
                debug!("notification {} dismissed", id);
                self.state = DisplayState::Idle;
                self.show_next(now)
            }
            _ => None,
        }
    }

    fn show_next(&mut self, now: Instant) -> Option<AchievementId> {
        if self.state != DisplayState::Idle {
            return None;
        }
        let id = self.backlog.pop_front()?;
        self.state = DisplayState::Showing {
            id,
            expires_at: now + self.display_for,
        };
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOW: Duration = Duration::from_millis(3200);

    #[test]
    fn test_batch_shown_ascending() {
        let t0 = Instant::now();
        let mut q = NotificationQueue::default();

        assert_eq!(q.enqueue(&[3, 1], t0), Some(1));
        assert_eq!(q.pending(), 1);

        assert_eq!(q.tick(t0 + Duration::from_millis(3199)), None);
        assert_eq!(q.current(), Some(1));

        assert_eq!(q.tick(t0 + SHOW), Some(3));
        assert_eq!(q.next_deadline(), Some(t0 + SHOW + SHOW));

        assert_eq!(q.tick(t0 + SHOW * 2), None);
        assert!(q.is_idle());
    }

    #[test]
    fn test_batches_are_fifo() {
        let t0 = Instant::now();
        let mut q = NotificationQueue::new(SHOW);
        q.enqueue(&[5], t0);
        q.enqueue(&[2], t0);
        assert_eq!(q.current(), Some(5));
        assert_eq!(q.tick(t0 + SHOW), Some(2));
    }

    #[test]
    fn test_dismiss_shows_next_immediately() {
        let t0 = Instant::now();
        let mut q = NotificationQueue::new(SHOW);
        q.enqueue(&[1, 2], t0);

        let t1 = t0 + Duration::from_millis(500);
        assert_eq!(q.dismiss(1, t1), Some(2));
        assert_eq!(q.next_deadline(), Some(t1 + SHOW));
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let t0 = Instant::now();
        let mut q = NotificationQueue::new(SHOW);
        q.enqueue(&[1, 2], t0);

        q.dismiss(1, t0);
        assert_eq!(q.dismiss(1, t0), None);
        assert_eq!(q.current(), Some(2));

        q.dismiss(2, t0);
        assert_eq!(q.dismiss(2, t0), None);
        assert!(q.is_idle());
    }

    #[test]
    fn test_nothing_dropped() {
        let t0 = Instant::now();
        let mut q = NotificationQueue::new(SHOW);
        let ids: Vec<AchievementId> = (1..=9).rev().collect();
        let mut seen = vec![q.enqueue(&ids, t0).unwrap()];

        let mut now = t0;
        while !q.is_idle() {
            now += SHOW;
            if let Some(id) = q.tick(now) {
                seen.push(id);
            }
        }
        assert_eq!(seen, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_enqueue_while_idle() {
        let mut q = NotificationQueue::default();
        assert_eq!(q.enqueue(&[], Instant::now()), None);
        assert_eq!(q.state(), DisplayState::Idle);
    }
}
