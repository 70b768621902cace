//! # Error Types Module
//!
//! Centralized error handling for the session core.
//!
//! ## Error Types
//! - `SessionError`: lifecycle and authorization failures of a workout session
//! - `ConfigError`: configuration file I/O and parsing errors
//! - `HostError` (in `host`): collaborator-side failures
//!
//! All variants are local, recoverable conditions reported to the UI
//! layer; none are fatal to the process.

use crate::session::SessionState;
use std::fmt;

/// Errors that can occur driving a workout session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// A lifecycle method was called from a state that does not permit it.
    /// Recoverable; the call had no effect.
    InvalidTransition {
        op: &'static str,
        state: SessionState,
    },
    /// The host could not create the underlying tracking session.
    /// The session stays NotStarted so the caller may retry or abandon.
    SessionUnavailable(String),
    /// The user declined health-data access; the session must never
    /// reach Running.
    AuthorizationDenied,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidTransition { op, state } => {
                write!(f, "Cannot {} a session that is {}", op, state)
            }
            SessionError::SessionUnavailable(reason) => {
                write!(f, "Workout session unavailable: {}", reason)
            }
            SessionError::AuthorizationDenied => {
                write!(f, "Health data access was denied")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Errors that can occur during configuration operations
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read config file
    ReadFailed(std::io::Error),
    /// Failed to write config file
    WriteFailed(std::io::Error),
    /// Failed to parse config file
    ParseFailed(toml::de::Error),
    /// Failed to serialize config
    SerializeFailed(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadFailed(e) => {
                write!(f, "Failed to read config file: {}", e)
            }
            ConfigError::WriteFailed(e) => {
                write!(f, "Failed to write config file: {}", e)
            }
            ConfigError::ParseFailed(e) => {
                write!(f, "Failed to parse config file: {}", e)
            }
            ConfigError::SerializeFailed(e) => {
                write!(f, "Failed to serialize config: {}", e)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadFailed(e) => Some(e),
            ConfigError::WriteFailed(e) => Some(e),
            ConfigError::ParseFailed(e) => Some(e),
            ConfigError::SerializeFailed(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_display() {
        let err = SessionError::InvalidTransition {
            op: "pause",
            state: SessionState::Ended,
        };
        let msg = err.to_string();
        assert!(msg.contains("pause"));
        assert!(msg.contains("ended"));
    }

    #[test]
    fn test_session_unavailable_display() {
        let err = SessionError::SessionUnavailable("activity kind unsupported".to_string());
        assert!(err.to_string().contains("unavailable"));
        assert!(err.to_string().contains("activity kind unsupported"));
    }

    #[test]
    fn test_authorization_denied_display() {
        assert!(SessionError::AuthorizationDenied
            .to_string()
            .contains("denied"));
    }

    #[test]
    fn test_config_error_chain() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ConfigError::ReadFailed(io_err);
        assert!(err.source().is_some());
    }
}
