//! # Session Runner Module
//!
//! Serializes everything that mutates a workout session onto one
//! dedicated thread.
//!
//! ## Key Components
//! - `SessionRunner`: owns the `WorkoutSession` and processes commands
//! - `SessionCommand`: UI transitions, host replies, and sample batches
//! - `SessionEvent`: outcomes emitted back to the UI
//!
//! ## Why one queue
//! User transitions arrive from the UI thread while sample batches
//! arrive from the host's notification channel; the platform does not
//! serialize the two. Funnelling both through a single command queue
//! makes the runner thread the only place session state is touched, so
//! a `pause` and an in-flight sample batch can never interleave.

use crate::activity::{ActivityDefinition, ChannelKind};
use crate::accumulator::Sample;
use crate::config::Config;
use crate::error::SessionError;
use crate::host::SessionHost;
use crate::session::{FinishedWorkoutRecord, WorkoutSession};
use chrono::{DateTime, Utc};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::path::PathBuf;
use std::sync::Arc;

/// Commands processed by the runner thread.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Kick off the host's permission request.
    Authorize,
    /// The host's asynchronous authorization verdict.
    AuthorizationResult(bool),
    Start {
        activity: ActivityDefinition,
        at: DateTime<Utc>,
    },
    Pause {
        at: DateTime<Utc>,
    },
    Resume {
        at: DateTime<Utc>,
    },
    End {
        at: DateTime<Utc>,
    },
    /// A sample batch delivered by one of the open subscriptions.
    Samples {
        channel: ChannelKind,
        batch: Vec<Sample>,
    },
    Shutdown,
}

/// Outcomes emitted to the UI thread.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    AuthorizationGranted,
    AuthorizationDenied,
    Started(&'static str),
    Paused,
    Resumed,
    Ended(FinishedWorkoutRecord),
    /// Whether the finished workout was saved to the health store.
    PersistOutcome(bool),
    /// A command was refused; the session state is unchanged.
    Rejected(SessionError),
}

/// Drives one workout session on a dedicated thread.
///
/// Runs until `Shutdown` or until the command channel closes. Rejected
/// commands surface as events; the loop itself never exits on them.
pub struct SessionRunner {
    commands: Receiver<SessionCommand>,
    events: Sender<SessionEvent>,
    host: Arc<dyn SessionHost>,
    session: WorkoutSession,
    config: Config,
    /// Where config changes are written; `None` means the platform
    /// default location.
    config_path: Option<PathBuf>,
    authorized: bool,
}

impl SessionRunner {
    /// Creates a new SessionRunner.
    ///
    /// Returns the runner plus the command sender and event receiver
    /// for the UI thread. The caller spawns a thread and calls `run()`.
    pub fn new(
        host: Arc<dyn SessionHost>,
        config: Config,
        config_path: Option<PathBuf>,
    ) -> (
        Self,
        Sender<SessionCommand>,
        Receiver<SessionEvent>,
    ) {
        let (command_sender, command_receiver) = unbounded();
        let (event_sender, event_receiver) = unbounded();

        let runner = SessionRunner {
            commands: command_receiver,
            events: event_sender,
            session: WorkoutSession::new(host.clone()),
            host,
            config,
            config_path,
            authorized: false,
        };

        (runner, command_sender, event_receiver)
    }

    /// Runs the session command loop.
    ///
    /// This should be called in a spawned thread. It blocks until the
    /// command channel is closed or a `Shutdown` command arrives.
    pub fn run(mut self) {
        while let Ok(command) = self.commands.recv() {
            match command {
                SessionCommand::Authorize => {
                    log::info!("Session runner: requesting health data authorization");
                    self.host
                        .request_authorization(&ChannelKind::all(), &ChannelKind::all());
                }
                SessionCommand::AuthorizationResult(granted) => {
                    self.authorized = granted;
                    if granted {
                        log::info!("Health data authorization granted");
                        let _ = self.events.send(SessionEvent::AuthorizationGranted);
                    } else {
                        log::warn!("Health data authorization denied");
                        let _ = self.events.send(SessionEvent::AuthorizationDenied);
                    }
                }
                SessionCommand::Start { activity, at } => self.handle_start(activity, at),
                SessionCommand::Pause { at } => match self.session.pause(at) {
                    Ok(()) => {
                        let _ = self.events.send(SessionEvent::Paused);
                    }
                    Err(e) => {
                        let _ = self.events.send(SessionEvent::Rejected(e));
                    }
                },
                SessionCommand::Resume { at } => match self.session.resume(at) {
                    Ok(()) => {
                        let _ = self.events.send(SessionEvent::Resumed);
                    }
                    Err(e) => {
                        let _ = self.events.send(SessionEvent::Rejected(e));
                    }
                },
                SessionCommand::End { at } => self.handle_end(at),
                SessionCommand::Samples { channel, batch } => {
                    self.session.ingest(channel, &batch);
                }
                SessionCommand::Shutdown => {
                    log::info!("Session runner: shutdown requested");
                    break;
                }
            }
        }

        log::info!("Session runner: command channel closed, shutting down");
    }

    fn handle_start(&mut self, activity: ActivityDefinition, at: DateTime<Utc>) {
        // A session must never reach Running without a granted
        // authorization
        if !self.authorized {
            let _ = self
                .events
                .send(SessionEvent::Rejected(SessionError::AuthorizationDenied));
            return;
        }

        match self.session.start(activity, at) {
            Ok(()) => {
                self.remember_activity(activity.name);
                let _ = self.events.send(SessionEvent::Started(activity.name));
            }
            Err(e) => {
                let _ = self.events.send(SessionEvent::Rejected(e));
            }
        }
    }

    fn handle_end(&mut self, at: DateTime<Utc>) {
        match self.session.end(at) {
            Ok(record) => {
                let _ = self.events.send(SessionEvent::Ended(record.clone()));
                if self.config.enable_autosave {
                    let saved = match self.host.persist(&record) {
                        Ok(()) => true,
                        Err(e) => {
                            log::error!("Could not persist workout: {}", e);
                            false
                        }
                    };
                    let _ = self.events.send(SessionEvent::PersistOutcome(saved));
                }
            }
            Err(e) => {
                let _ = self.events.send(SessionEvent::Rejected(e));
            }
        }
    }

    /// Preselect this activity in the picker on the next launch.
    fn remember_activity(&mut self, name: &str) {
        self.config.last_activity = Some(name.to_string());
        let result = match &self.config_path {
            Some(path) => self.config.save_to(path),
            None => self.config.save(),
        };
        if let Err(e) = result {
            log::debug!("Could not remember last activity: {}", e);
        }
    }
}
