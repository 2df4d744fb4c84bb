//! Shipment model - a relocation and the milestones it owns.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use crate::error::{CoreError, Result};
use crate::id::ShipmentId;
use crate::lifecycle::LifecycleState;
use crate::milestone::Milestone;
use crate::Time;

/// A shipment moves one client's goods from origin to destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    /// Unique identifier
    pub id: ShipmentId,

    /// Business reference shown to the client
    pub reference: String,

    /// Client name
    pub client_name: String,

    /// Client contact email
    #[serde(default)]
    pub client_email: Option<String>,

    /// Origin address
    pub origin: String,

    /// Destination address
    pub destination: String,

    /// Stage the shipment is currently in
    pub current_state: LifecycleState,

    /// One milestone per lifecycle stage
    pub milestones: Vec<Milestone>,

    /// Created at
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

impl Shipment {
    /// Create a shipment with one milestone per lifecycle stage.
    ///
    /// Planned dates are cumulative from `start`: each stage is due once the
    /// SLA days of every stage up to and including it have elapsed. Stages
    /// whose due date would fall outside the representable range are left
    /// without a planned date.
    pub fn new(
        reference: impl Into<String>,
        client_name: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        start: Time,
    ) -> Self {
        let mut due = Some(start);
        let milestones = LifecycleState::ALL
            .iter()
            .map(|state| {
                let sla = state.default_sla_days();
                due = due.and_then(|d| d.checked_add_signed(Duration::days(i64::from(sla))));
                let milestone = Milestone::new(*state, sla);
                match due {
                    Some(planned) => milestone.with_planned_date(planned),
                    None => milestone,
                }
            })
            .collect();

        Self {
            id: ShipmentId::new(),
            reference: reference.into(),
            client_name: client_name.into(),
            client_email: None,
            origin: origin.into(),
            destination: destination.into(),
            current_state: LifecycleState::Inquiry,
            milestones,
            created_at: start,
            updated_at: start,
        }
    }

    /// Set the client email.
    pub fn with_client_email(mut self, email: impl Into<String>) -> Self {
        self.client_email = Some(email.into());
        self
    }

    /// Milestone for a stage.
    pub fn milestone(&self, state: LifecycleState) -> Option<&Milestone> {
        self.milestones.iter().find(|m| m.state == state)
    }

    /// Mutable milestone for a stage.
    pub fn milestone_mut(&mut self, state: LifecycleState) -> Option<&mut Milestone> {
        self.milestones.iter_mut().find(|m| m.state == state)
    }

    /// Milestone the shipment is currently in.
    pub fn current_milestone(&self) -> Option<&Milestone> {
        self.milestone(self.current_state)
    }

    /// Complete a stage at `at`.
    ///
    /// Completing the current stage moves the shipment to the next one.
    pub fn complete_stage(&mut self, state: LifecycleState, at: Time) -> Result<()> {
        let milestone = self
            .milestone_mut(state)
            .ok_or(CoreError::MilestoneNotFound(state))?;
        milestone.complete(at);

        if state == self.current_state {
            if let Some(next) = state.next() {
                self.current_state = next;
            }
        }
        self.updated_at = at;
        Ok(())
    }

    /// Move a stage's planned date.
    pub fn reschedule(&mut self, state: LifecycleState, planned: Time, at: Time) -> Result<()> {
        let milestone = self
            .milestone_mut(state)
            .ok_or(CoreError::MilestoneNotFound(state))?;
        milestone.planned_date = Some(planned);
        self.updated_at = at;
        Ok(())
    }

    /// Completed milestones as a percentage of all milestones.
    pub fn progress_pct(&self) -> f32 {
        let total = self.milestones.len();
        if total == 0 {
            return 0.0;
        }
        let completed = self.milestones.iter().filter(|m| m.completed).count();
        (completed as f32 / total as f32) * 100.0
    }
}
