//! Progress store: the session service owning the player record.
//!
//! Each operation runs the matching pure reducer from `stats`, merges any
//! newly unlocked achievements, persists the snapshot (write-through), and
//! only then hands profile fields to the remote mirror. Storage write
//! failures are logged and the session continues in memory.

use crate::achievements::{self, AchievementId};
use crate::levels::LevelId;
use crate::stats::PlayerStats;
use crate::storage::{self, KeyValueStore};
use crate::sync::{SyncWorker, UserPatch};
use tracing::{debug, info, warn};

pub struct ProgressStore {
    stats: PlayerStats,
    store: Box<dyn KeyValueStore>,
    sync: Option<SyncWorker>,
}

impl ProgressStore {
    /// Open the store, loading the persisted record or defaults
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let stats = storage::load_stats(store.as_ref());
        debug!(
            "loaded player record: solved={} score={} achievements={}",
            stats.total_solved,
            stats.total_score,
            stats.unlocked_achievements.len()
        );
        Self { stats, store, sync: None }
    }

    /// Mirror profile changes through `worker`
    pub fn with_sync(mut self, worker: SyncWorker) -> Self {
        self.sync = Some(worker);
        self
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn record_correct_answer(&mut self, is_quick: bool) -> Vec<AchievementId> {
        let next = self.stats.record_correct_answer(is_quick);
        self.commit(next, None)
    }

    pub fn record_wrong_answer(&mut self) -> Vec<AchievementId> {
        let next = self.stats.record_wrong_answer();
        self.commit(next, None)
    }

    pub fn record_round_complete(&mut self, level_id: LevelId, is_perfect: bool) -> Vec<AchievementId> {
        let next = self.stats.record_round_complete(level_id, is_perfect);
        self.commit(next, None)
    }

    pub fn update_score(&mut self, new_score: u64) -> Vec<AchievementId> {
        let next = self.stats.update_score(new_score);
        self.commit(next, Some(UserPatch::total_score(new_score)))
    }

    pub fn update_name(&mut self, name: &str) -> Vec<AchievementId> {
        let next = self.stats.update_name(name);
        self.commit(next, Some(UserPatch::username(name)))
    }

    pub fn update_avatar(&mut self, avatar_id: u32) -> Vec<AchievementId> {
        let next = self.stats.update_avatar(avatar_id);
        self.commit(next, Some(UserPatch::avatar(avatar_id)))
    }

    /// Replace the record with defaults and remove it from storage
    pub fn reset(&mut self) {
        self.stats = PlayerStats::default();
        if let Err(e) = storage::clear_stats(self.store.as_ref()) {
            warn!("failed to clear stored player record: {}", e);
        }
        info!("player progress reset");
    }

    /// Stop the sync worker after it has drained pending patches
    pub fn shutdown(mut self) {
        if let Some(worker) = self.sync.take() {
            worker.shutdown();
        }
    }

    fn commit(&mut self, mut next: PlayerStats, patch: Option<UserPatch>) -> Vec<AchievementId> {
        let unlocked = achievements::apply(&self.stats, &mut next);
        debug!(
            "stats: solved {} -> {}, streak {} -> {} (best {}), quick {}, score {} -> {}",
            self.stats.total_solved,
            next.total_solved,
            self.stats.current_streak,
            next.current_streak,
            next.best_streak,
            next.quick_answers,
            self.stats.total_score,
            next.total_score
        );
        for id in &unlocked {
            if let Some(a) = achievements::achievement(*id) {
                info!("achievement {} unlocked: {}", id, a.title);
            }
        }

        if let Err(e) = storage::save_stats(self.store.as_ref(), &next) {
            warn!("failed to persist player record, continuing in memory: {}", e);
        }
        self.stats = next;

        if let (Some(worker), Some(patch)) = (&self.sync, patch) {
            worker.submit(patch);
        }
        unlocked
    }
}
