//! Shipment progress reporting.

use chrono::NaiveDate;
use movetrack_core::{Alert, LifecycleState, Milestone, Shipment, ShipmentId};
use serde::{Deserialize, Serialize};

use crate::estimator::DeadlineEstimator;
use crate::sla::{compliance_pct, EvaluatorConfig, SlaEvaluator};

/// Completion statistics over a milestone list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComplianceSummary {
    /// Milestones in the list
    pub total: usize,

    /// Completed milestones
    pub completed: usize,

    /// Completed after their planned day
    pub late: usize,

    /// Completed on or before their planned day
    pub on_time: usize,

    /// Rounded on-time share of completed milestones
    pub compliance_pct: Option<u8>,
}

impl ComplianceSummary {
    /// Summarize a milestone list.
    pub fn from_milestones(milestones: &[Milestone]) -> Self {
        let completed = milestones.iter().filter(|m| m.completed).count();
        let late = milestones.iter().filter(|m| m.is_late()).count();

        Self {
            total: milestones.len(),
            completed,
            late,
            on_time: completed - late,
            compliance_pct: compliance_pct(completed, late),
        }
    }
}

/// Everything known about a shipment's progress on a given day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentReport {
    /// Shipment
    pub shipment_id: ShipmentId,

    /// Business reference
    pub reference: String,

    /// Current stage
    pub current_state: LifecycleState,

    /// Completed milestones as a percentage
    pub progress_pct: f32,

    /// Completion statistics
    pub compliance: ComplianceSummary,

    /// Ordered SLA alerts
    pub alerts: Vec<Alert>,

    /// Projected closing date
    pub estimated_completion: Option<NaiveDate>,

    /// Date the report was computed for
    pub evaluated_on: NaiveDate,
}

/// Builds progress reports for shipments.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    evaluator: SlaEvaluator,
    estimator: DeadlineEstimator,
}

impl ProgressTracker {
    /// Create a tracker.
    pub fn new(config: EvaluatorConfig) -> Self {
        Self {
            evaluator: SlaEvaluator::new(config),
            estimator: DeadlineEstimator,
        }
    }

    /// Build a report as of `today`.
    pub fn report(&self, shipment: &Shipment, today: NaiveDate) -> ShipmentReport {
        ShipmentReport {
            shipment_id: shipment.id,
            reference: shipment.reference.clone(),
            current_state: shipment.current_state,
            progress_pct: shipment.progress_pct(),
            compliance: ComplianceSummary::from_milestones(&shipment.milestones),
            alerts: self
                .evaluator
                .evaluate(&shipment.milestones, shipment.current_state, today),
            estimated_completion: self.estimator.estimate_completion(shipment, today),
            evaluated_on: today,
        }
    }
}
