//! SLA tracking for shipments.
//!
//! Milestone compliance evaluation, progress reports, and completion estimates.

#![warn(missing_docs)]

pub mod sla;
pub mod tracker;
pub mod estimator;

pub use sla::{evaluate, EvaluatorConfig, SlaEvaluator, EvaluationRequest, EvaluationResponse};
pub use tracker::{ProgressTracker, ShipmentReport, ComplianceSummary};
pub use estimator::DeadlineEstimator;
