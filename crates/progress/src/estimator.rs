//! Completion date estimation.

use chrono::{Duration, NaiveDate};
use movetrack_core::Shipment;

/// Projects when a shipment will close.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadlineEstimator;

impl DeadlineEstimator {
    /// Estimate the closing date of a shipment.
    ///
    /// Starts from the later of `today` and the current stage's planned day,
    /// then adds the SLA of every open stage after the current one. Returns
    /// `None` once every milestone is completed, or when the projection falls
    /// outside the representable date range.
    pub fn estimate_completion(&self, shipment: &Shipment, today: NaiveDate) -> Option<NaiveDate> {
        if shipment.milestones.iter().all(|m| m.completed) {
            return None;
        }

        let base = shipment
            .current_milestone()
            .and_then(|m| m.planned_date)
            .map(|planned| planned.date_naive().max(today))
            .unwrap_or(today);

        let remaining: i64 = shipment
            .milestones
            .iter()
            .filter(|m| m.state > shipment.current_state && !m.completed)
            .map(|m| i64::from(m.sla_days))
            .sum();

        base.checked_add_signed(Duration::try_days(remaining)?)
    }
}
