//! # exertion
//!
//! Platform-independent core of a smartwatch workout companion app:
//! the session lifecycle state machine, live biometric aggregation,
//! pause-aware elapsed time, and the collaborator boundary through
//! which the host platform supplies subscriptions, authorization, and
//! persistence.
//!
//! The host drives the core through `SessionRunner`'s command channel;
//! the UI reads display values by polling and reacts to the runner's
//! events. No widget, permission dialog, or storage engine lives here.

pub mod accumulator;
pub mod activity;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod session;

pub use accumulator::{MetricAccumulator, Sample};
pub use activity::{ActivityDefinition, ActivityKind, Aggregation, ChannelKind};
pub use clock::PauseClock;
pub use config::Config;
pub use engine::{SessionCommand, SessionEvent, SessionRunner};
pub use error::{ConfigError, SessionError};
pub use host::{HostError, SessionHost, SubscriptionHandle};
pub use session::{FinishedWorkoutRecord, SessionState, WorkoutSession};
