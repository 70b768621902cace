//! Pause-aware elapsed time for the workout display.
//!
//! `pause_started` is set iff the clock is currently paused.

use chrono::{DateTime, Duration, Utc};

/// Tracks active time since a fixed start, excluding paused stretches.
///
/// All methods take `now` explicitly; the clock never reads the wall
/// clock itself.
#[derive(Debug, Clone, Copy)]
pub struct PauseClock {
    start_time: DateTime<Utc>,
    pause_started: Option<DateTime<Utc>>,
    paused_total: Duration,
}

impl PauseClock {
    /// A running clock anchored at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            start_time: now,
            pause_started: None,
            paused_total: Duration::zero(),
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn is_paused(&self) -> bool {
        self.pause_started.is_some()
    }

    /// Enter the paused sub-state; no-op if already paused.
    pub fn pause(&mut self, now: DateTime<Utc>) {
        if self.pause_started.is_none() {
            self.pause_started = Some(now);
        }
    }

    /// Leave the paused sub-state, folding the pause into the
    /// accumulated total; no-op if already running.
    pub fn resume(&mut self, now: DateTime<Utc>) {
        if let Some(pause_started) = self.pause_started.take() {
            self.paused_total = self.paused_total + (now - pause_started);
        }
    }

    /// Active time at `now`: wall time since start minus every paused
    /// stretch, including the one still in progress.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        let current_pause = match self.pause_started {
            Some(pause_started) => now - pause_started,
            None => Duration::zero(),
        };
        (now - self.start_time) - self.paused_total - current_pause
    }
}
