//! Errors raised by the shipment model.

use crate::LifecycleState;

/// Result alias for core model operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur when mutating a shipment.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    /// The shipment has no milestone for the requested stage
    #[error("No milestone for stage: {0}")]
    MilestoneNotFound(LifecycleState),

    /// A stage name could not be parsed
    #[error("Unknown lifecycle state: {0}")]
    UnknownState(String),
}
