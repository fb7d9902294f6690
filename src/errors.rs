//! Error types for the solver and playback engine
//!
//! This module defines [`HanoiError`], the single error type shared by the
//! peg model, the solver, the animation scheduler and the [`Session`].
//!
//! None of these errors are fatal to the application:
//!
//! - [`HanoiError::InvalidConfiguration`] is recovered by keeping the previous value
//! - [`HanoiError::ConcurrentOperationRejected`] is ignored by the caller
//! - [`HanoiError::InvariantViolation`] indicates a solver defect and is logged
//!
//! [`Session`]: crate::session::Session

use crate::model::Peg;
use thiserror::Error;

/// Result alias for engine operations
pub type HanoiResult<T> = Result<T, HanoiError>;

/// Errors raised by the engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HanoiError {
    /// Non-numeric or out-of-range configuration input
    #[error("invalid configuration '{input}': {reason}")]
    InvalidConfiguration { input: String, reason: String },

    /// A move tried to take a disk from an empty peg
    #[error("invariant violation: peg {peg} is empty")]
    EmptyPeg { peg: Peg },

    /// A move tried to place a disk on top of a smaller one
    #[error("invariant violation: cannot place disk {disk} on disk {below} (peg {peg})")]
    OrderViolation { disk: u32, below: u32, peg: Peg },

    /// A solve or replay was requested while a replay is running
    #[error("{operation} rejected: a replay is already running")]
    ConcurrentOperationRejected { operation: &'static str },
}

impl HanoiError {
    /// Whether this error is an invariant violation (a solver or scheduler defect)
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            HanoiError::EmptyPeg { .. } | HanoiError::OrderViolation { .. }
        )
    }

    pub(crate) fn invalid_config(input: impl Into<String>, reason: impl Into<String>) -> Self {
        HanoiError::InvalidConfiguration {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn rejected(operation: &'static str) -> Self {
        HanoiError::ConcurrentOperationRejected { operation }
    }
}
