//! Terminal play session.
//!
//! Wraps the progress store together with the unlock notification queue and
//! drives rounds from a line-based reader. Every notification is printed when
//! it becomes visible; leftovers are flushed in order when play ends.

use crate::display;
use crate::ui::{colors, symbols};
use anyhow::{Context, Result};
use mathtrainer_core::achievements::{self, AchievementId};
use mathtrainer_core::levels::{self, ROUND_SIZE};
use mathtrainer_core::scoring::{self, OVERDUE_SECS};
use mathtrainer_core::{
    FileStore, HttpRemoteSync, KeyValueStore, NotificationQueue, ProgressStore, ResponseClock, Round,
    RoundSummary, SyncWorker, TrainerConfig,
};
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Input line that toggles the pause state
const PAUSE_KEY: &str = "p";

pub struct Session {
    progress: ProgressStore,
    notifications: NotificationQueue,
}

impl Session {
    /// Open the file-backed session described by `config`, mirroring profile
    /// fields remotely when sync has a credential
    pub fn open(config: &TrainerConfig) -> Result<Self> {
        let store = FileStore::new(config.storage.data_dir.clone());
        let mut progress = ProgressStore::open(Box::new(store));

        if let Some(credential) = config.sync.credential() {
            let remote = HttpRemoteSync::new(&config.sync).context("failed to build sync client")?;
            progress = progress.with_sync(SyncWorker::spawn(Arc::new(remote), credential));
            info!("profile sync enabled: {}", config.sync.endpoint);
        }

        Ok(Self {
            progress,
            notifications: NotificationQueue::new(config.notifications.display_duration()),
        })
    }

    pub fn with_store(store: Box<dyn KeyValueStore>, display_for: Duration) -> Self {
        Self {
            progress: ProgressStore::open(store),
            notifications: NotificationQueue::new(display_for),
        }
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressStore {
        &mut self.progress
    }

    /// Queue freshly unlocked ids and print whichever became visible
    pub fn notify<W: Write>(&mut self, ids: &[AchievementId], now: Instant, out: &mut W) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let shown = self.notifications.enqueue(ids, now);
        self.print_shown(shown, out)
    }

    /// Advance the display timer
    pub fn pump<W: Write>(&mut self, now: Instant, out: &mut W) -> Result<()> {
        while let Some(id) = self.notifications.tick(now) {
            self.print_shown(Some(id), out)?;
        }
        Ok(())
    }

    /// Dismiss everything still queued, printing each one as it comes up
    pub fn flush_notifications<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let now = Instant::now();
        while let Some(id) = self.notifications.current() {
            let next = self.notifications.dismiss(id, now);
            self.print_shown(next, out)?;
        }
        Ok(())
    }

    /// Play `rounds` rounds of `round`, reading one answer per line.
    ///
    /// A `p` line pauses or resumes the question clock. Input ending early
    /// stops play and returns the rounds that finished.
    pub fn play<R: BufRead, W: Write>(
        &mut self,
        round: &mut Round,
        rounds: usize,
        mut input: R,
        out: &mut W,
    ) -> Result<Vec<RoundSummary>> {
        let mut summaries = Vec::new();

        'rounds: for n in 0..rounds {
            if n > 0 {
                round.restart();
            }
            writeln!(
                out,
                "{}{} ({}), round {}{}",
                colors::HEADER,
                levels::level_name(round.level_id()),
                levels::range_label(round.range()),
                n + 1,
                colors::RESET
            )?;

            while !round.is_finished() {
                let mut clock = ResponseClock::started(Instant::now());
                write!(out, "[{}/{}] {} = ", round.index() + 1, ROUND_SIZE, round.question())?;
                out.flush()?;

                let answer = loop {
                    let mut line = String::new();
                    if input.read_line(&mut line).context("failed to read answer")? == 0 {
                        debug!("input closed mid-round");
                        writeln!(out)?;
                        break 'rounds;
                    }
                    let now = Instant::now();
                    self.pump(now, out)?;

                    let line = line.trim();
                    if line.eq_ignore_ascii_case(PAUSE_KEY) {
                        if clock.is_running() {
                            clock.pause(now);
                            write!(out, "{}paused{}, enter p to resume: ", colors::DIM, colors::RESET)?;
                        } else {
                            clock.resume(now);
                            write!(out, "{} = ", round.question())?;
                        }
                        out.flush()?;
                        continue;
                    }
                    if !clock.is_running() {
                        write!(out, "still paused, enter p to resume: ")?;
                        out.flush()?;
                        continue;
                    }
                    match line.parse::<i32>() {
                        Ok(value) => break value,
                        Err(_) => {
                            write!(out, "enter a number: ")?;
                            out.flush()?;
                        }
                    }
                };

                let secs = clock.elapsed_secs(Instant::now());
                let Some(outcome) = round.submit(answer, secs as f64, &mut self.progress) else {
                    break;
                };

                let timer_color = if secs > OVERDUE_SECS { colors::ERR } else { colors::DIM };
                if outcome.correct {
                    writeln!(
                        out,
                        "{}{}{} +{} {}{}{}{}",
                        colors::OK,
                        symbols::OK,
                        colors::RESET,
                        outcome.points,
                        timer_color,
                        scoring::format_timer(secs),
                        colors::RESET,
                        if outcome.quick { " quick!" } else { "" }
                    )?;
                } else {
                    writeln!(
                        out,
                        "{}{}{} answer was {}",
                        colors::ERR,
                        symbols::ERR,
                        colors::RESET,
                        outcome.expected
                    )?;
                }
                self.notify(&outcome.unlocked, Instant::now(), out)?;
            }

            let summary = round.summary();
            writeln!(out, "{}", display::render_summary(&summary))?;
            summaries.push(summary);
        }

        self.flush_notifications(out)?;
        Ok(summaries)
    }

    /// Drain remote sync and release the store
    pub fn close(self) {
        self.progress.shutdown();
    }

    fn print_shown<W: Write>(&self, shown: Option<AchievementId>, out: &mut W) -> Result<()> {
        if let Some(a) = shown.and_then(achievements::achievement) {
            writeln!(out, "{}", display::render_unlock(a))?;
        }
        Ok(())
    }
}
