//! # Session Host Boundary Module
//!
//! The contract the core requires from the host platform: health-data
//! authorization, live sample subscriptions, and workout persistence.
//!
//! ## Key Types
//! - `SessionHost`: injected collaborator trait the session calls into
//! - `SubscriptionHandle`: opaque token identifying one open subscription
//! - `HostError`: collaborator-side failures
//!
//! ## Delivery direction
//! Calls on `SessionHost` are requests out of the core. Results that
//! arrive later (sample batches, the authorization verdict) come back
//! in as explicit `SessionCommand`s on the runner's queue, never as
//! implicit callbacks, so tests can drive the core without a real host.

use crate::activity::ChannelKind;
use crate::session::FinishedWorkoutRecord;
use chrono::{DateTime, Utc};
use std::fmt;

/// Opaque token for one open sample subscription, issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(pub u64);

/// Errors that can occur on the host side of the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum HostError {
    /// The underlying tracking session could not be created
    /// (hardware or activity kind unsupported).
    SessionCreation(String),
    /// The finished workout record could not be saved.
    PersistFailed(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::SessionCreation(reason) => {
                write!(f, "Failed to create tracking session: {}", reason)
            }
            HostError::PersistFailed(reason) => {
                write!(f, "Failed to save workout: {}", reason)
            }
        }
    }
}

impl std::error::Error for HostError {}

/// The platform's sensor-subscription, permission, and persistence engine.
///
/// Implementations are expected to be cheap to call: subscription
/// open/close and authorization are fire-and-forget from the core's
/// point of view, with data flowing back asynchronously.
pub trait SessionHost: Send + Sync {
    /// Ask the platform for read/write access to the given channels.
    /// The verdict arrives later as `SessionCommand::AuthorizationResult`.
    fn request_authorization(&self, read: &[ChannelKind], write: &[ChannelKind]);

    /// Open a live subscription delivering samples captured at or after
    /// `since`.
    fn open_subscription(
        &self,
        channel: ChannelKind,
        since: DateTime<Utc>,
    ) -> Result<SubscriptionHandle, HostError>;

    /// Close a previously opened subscription. Unknown handles are the
    /// host's problem; the core never closes a handle twice.
    fn close_subscription(&self, handle: SubscriptionHandle);

    /// Save a finished workout to the platform's health store.
    fn persist(&self, record: &FinishedWorkoutRecord) -> Result<(), HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_display() {
        let err = HostError::SessionCreation("no hardware session".to_string());
        assert!(err.to_string().contains("no hardware session"));

        let err = HostError::PersistFailed("store unavailable".to_string());
        assert!(err.to_string().contains("save"));
    }
}
