//! Error types for the breathwork library.

use thiserror::Error;

use crate::models::PhaseState;

/// Comprehensive error type for all breathwork operations.
///
/// Configuration failures ([`BreathworkError::InvalidInput`]) are user
/// facing and are surfaced verbatim. Every other variant signals a broken
/// state contract in the driving code and is never expected in a correct
/// session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BreathworkError {
    /// Invalid configuration or input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Out-of-order phase lifecycle transition
    #[error("Cannot {action} phase in state {state}")]
    InvalidTransition {
        action: &'static str,
        state: PhaseState,
    },
    /// Timer construction with an unusable duration or threshold
    #[error("Invalid timer: {reason}")]
    InvalidTimer { reason: String },
    /// A timer is single-use and cannot be started twice
    #[error("Timer is already running")]
    TimerAlreadyRunning,
    /// Exercise started while a previous run is still active
    #[error("Exercise already started")]
    AlreadyStarted,
    /// Exercise started again after it ran to completion
    #[error("Exercise already completed. Call reset() to start again")]
    AlreadyCompleted,
    /// Exercise operation attempted before start()
    #[error("Exercise not started")]
    NotStarted,
    /// Advance attempted before the active phase timer expired
    #[error("Current phase not complete")]
    PhaseNotComplete,
    /// Cancellation observed at a suspension point of the session loop
    #[error("Exercise interrupted by user")]
    Interrupted,
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> BreathworkError {
        BreathworkError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl BreathworkError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a timer construction error.
    pub fn invalid_timer(reason: impl Into<String>) -> Self {
        Self::InvalidTimer {
            reason: reason.into(),
        }
    }

    /// Returns `true` for user-facing configuration errors.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Returns the offending field name for configuration errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Returns the human-readable reason without the field prefix.
    ///
    /// The CLI prints this form, matching how validation messages are
    /// phrased for the user ("Hold duration cannot exceed ...").
    pub fn reason(&self) -> String {
        match self {
            Self::InvalidInput { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for breathwork operations
pub type Result<T> = std::result::Result<T, BreathworkError>;
