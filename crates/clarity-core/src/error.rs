//! Error types for triage operations

use thiserror::Error;

/// Errors surfaced by the triage engine.
///
/// Stale or unknown entry handles are not errors; they show up as
/// [`RouteOutcome::Unknown`](crate::RouteOutcome::Unknown) or
/// [`Step::Stale`](crate::Step::Stale) instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TriageError {
    /// A context mode threshold outside `[0, 1]`.
    #[error("urgency threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),

    /// The notification id already has a live entry in one of the queues.
    #[error("notification {0} already has a live triage entry")]
    AlreadyAdmitted(String),

    #[error("unknown source type: {0}")]
    UnknownSourceType(String),

    #[error("unknown context mode: {0}")]
    UnknownMode(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, TriageError>;
