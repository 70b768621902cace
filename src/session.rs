//! # Workout Session Module
//!
//! The session lifecycle state machine and live metrics owner.
//!
//! ## Key Types
//! - `WorkoutSession`: NotStarted → Running ⇄ Paused → Ended, owning one
//!   accumulator and one pause clock for its whole lifetime
//! - `FinishedWorkoutRecord`: the snapshot handed to the host for persistence
//!
//! ## Lifecycle
//! `start` opens one subscription per channel of the selected activity
//! and anchors the clock; `end` closes every open subscription and
//! builds the final record. Samples are only merged while Running;
//! batches arriving in any other state are dropped. The UI reads
//! display values and elapsed time by polling, on its own cadence.

use crate::accumulator::{MetricAccumulator, Sample};
use crate::activity::{ActivityDefinition, ChannelKind};
use crate::clock::PauseClock;
use crate::error::SessionError;
use crate::host::{SessionHost, SubscriptionHandle};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Lifecycle state of a workout session. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    NotStarted,
    Running,
    Paused,
    Ended,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::NotStarted => "not started",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::Ended => "ended",
        };
        write!(f, "{}", name)
    }
}

/// The persisted summary of one completed workout.
///
/// `totals` covers every channel opened at start; channels that never
/// delivered a sample appear with `0.0`.
#[derive(Debug, Clone, Serialize)]
pub struct FinishedWorkoutRecord {
    pub activity: ActivityDefinition,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// Wall time minus accumulated pauses at the moment of `end`.
    #[serde(with = "duration_seconds")]
    pub active_duration: Duration,
    pub totals: HashMap<ChannelKind, f64>,
}

mod duration_seconds {
    use chrono::Duration;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(d.num_seconds())
    }
}

/// One user-initiated workout tracking lifecycle.
///
/// Exclusively owns its accumulator and clock; at most one mutation is
/// in progress at a time because all calls are funneled through the
/// runner thread (see `engine`).
pub struct WorkoutSession {
    host: Arc<dyn SessionHost>,
    state: SessionState,
    activity: Option<ActivityDefinition>,
    accumulator: MetricAccumulator,
    clock: Option<PauseClock>,
    subscriptions: HashMap<ChannelKind, SubscriptionHandle>,
}

impl WorkoutSession {
    /// A session in the NotStarted state. The caller must have obtained
    /// authorization from the host before driving it to Running.
    pub fn new(host: Arc<dyn SessionHost>) -> Self {
        Self {
            host,
            state: SessionState::NotStarted,
            activity: None,
            accumulator: MetricAccumulator::new(),
            clock: None,
            subscriptions: HashMap::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn activity(&self) -> Option<&ActivityDefinition> {
        self.activity.as_ref()
    }

    /// Begin tracking `activity` at `now`.
    ///
    /// Opens one subscription per channel the activity tracks. If the
    /// host cannot open one of them, the ones already opened are closed
    /// again, the state stays NotStarted, and `SessionUnavailable` is
    /// returned so the caller may retry or abandon.
    pub fn start(
        &mut self,
        activity: ActivityDefinition,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        if self.state != SessionState::NotStarted {
            return Err(SessionError::InvalidTransition {
                op: "start",
                state: self.state,
            });
        }

        let mut opened = HashMap::new();
        for channel in activity.channels() {
            match self.host.open_subscription(channel, now) {
                Ok(handle) => {
                    opened.insert(channel, handle);
                }
                Err(e) => {
                    for handle in opened.values() {
                        self.host.close_subscription(*handle);
                    }
                    log::error!("Could not start {} session: {}", activity.name, e);
                    return Err(SessionError::SessionUnavailable(e.to_string()));
                }
            }
        }

        log::info!(
            "Starting {} session with {} channels",
            activity.name,
            opened.len()
        );

        self.activity = Some(activity);
        self.accumulator = MetricAccumulator::new();
        self.clock = Some(PauseClock::new(now));
        self.subscriptions = opened;
        self.state = SessionState::Running;
        Ok(())
    }

    /// Pause the session. Subscriptions stay open; the host is expected
    /// to stop delivering while paused, and anything it still delivers
    /// is dropped by `ingest`.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.state != SessionState::Running {
            return Err(SessionError::InvalidTransition {
                op: "pause",
                state: self.state,
            });
        }

        if let Some(clock) = &mut self.clock {
            clock.pause(now);
        }
        self.state = SessionState::Paused;
        log::info!("Session paused");
        Ok(())
    }

    /// Resume a paused session.
    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if self.state != SessionState::Paused {
            return Err(SessionError::InvalidTransition {
                op: "resume",
                state: self.state,
            });
        }

        if let Some(clock) = &mut self.clock {
            clock.resume(now);
        }
        self.state = SessionState::Running;
        log::info!("Session resumed");
        Ok(())
    }

    /// Merge a sample batch into the running totals.
    ///
    /// Only processed while Running; batches arriving in any other
    /// state are silently dropped.
    pub fn ingest(&mut self, channel: ChannelKind, samples: &[Sample]) {
        if self.state != SessionState::Running {
            log::debug!(
                "Dropping {} {:?} samples while {}",
                samples.len(),
                channel,
                self.state
            );
            return;
        }
        self.accumulator.ingest(channel, samples);
    }

    /// End the session, closing every open subscription and building
    /// the final record. Terminal; a second call fails the state guard,
    /// so subscriptions are never double-closed.
    pub fn end(&mut self, now: DateTime<Utc>) -> Result<FinishedWorkoutRecord, SessionError> {
        if self.state != SessionState::Running && self.state != SessionState::Paused {
            return Err(SessionError::InvalidTransition {
                op: "end",
                state: self.state,
            });
        }

        let opened: Vec<ChannelKind> = self.subscriptions.keys().copied().collect();
        for (_, handle) in self.subscriptions.drain() {
            self.host.close_subscription(handle);
        }
        self.state = SessionState::Ended;

        // The state guard means start() ran, so activity and clock are set
        let (activity, clock) = match (self.activity, self.clock) {
            (Some(activity), Some(clock)) => (activity, clock),
            _ => unreachable!("session was running without a start"),
        };

        let record = FinishedWorkoutRecord {
            activity,
            started_at: clock.started_at(),
            ended_at: now,
            active_duration: clock.elapsed(now),
            totals: self.accumulator.snapshot(&opened),
        };
        log::info!(
            "Ended {} session after {}s active",
            activity.name,
            record.active_duration.num_seconds()
        );
        Ok(record)
    }

    /// Last known value for a channel. Valid in any state; a summary
    /// screen may still read it after the session has ended.
    pub fn display_value(&self, channel: ChannelKind) -> f64 {
        self.accumulator.value(channel)
    }

    /// Active elapsed time at `now`; `None` until `start` has been called.
    pub fn elapsed_display(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.clock.map(|clock| clock.elapsed(now))
    }
}
