//! movetrack core data models.
//!
//! Shipments, their lifecycle milestones, and the alerts raised when a
//! milestone drifts from its SLA.

#![warn(missing_docs)]

// Core identities
mod id;
mod error;

// Shipment lifecycle
mod lifecycle;
mod milestone;
mod shipment;

// Compliance
mod alert;

// Re-exports
pub use id::*;
pub use error::{CoreError, Result};

pub use lifecycle::LifecycleState;
pub use milestone::Milestone;
pub use shipment::Shipment;
pub use alert::{Alert, AlertKind, Severity};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
