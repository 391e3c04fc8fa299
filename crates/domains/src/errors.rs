//! # DomainError
//!
//! Centralized error handling for the incident core.
//! Every failure is local, synchronous and recoverable by the caller.

use thiserror::Error;

use crate::models::IncidentId;

/// The primary error type for all core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// No current position when a report was submitted.
    #[error("location unavailable: incident cannot be pinned")]
    LocationUnavailable,

    /// The referenced incident does not exist (stale UI data).
    #[error("incident not found with ID {0}")]
    IncidentNotFound(IncidentId),

    /// Validation failure (e.g. blank incident type, out-of-range latitude)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Repository refused a write (e.g. duplicate incident id)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Place search failed at the network edge
    #[error("place lookup failed: {0}")]
    LookupFailed(String),
}

/// A specialized Result type for incident core logic.
pub type Result<T> = std::result::Result<T, DomainError>;
