//! Milestone model - one lifecycle stage of a shipment with its SLA.

use serde::{Deserialize, Serialize};
use crate::id::MilestoneId;
use crate::lifecycle::LifecycleState;
use crate::Time;

/// A milestone tracks one stage of a shipment against its SLA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique identifier
    pub id: MilestoneId,

    /// Stage this milestone covers
    pub state: LifecycleState,

    /// Target completion
    #[serde(default)]
    pub planned_date: Option<Time>,

    /// Actual completion, only set once completed
    #[serde(default)]
    pub actual_date: Option<Time>,

    /// Whether the stage is done
    #[serde(default)]
    pub completed: bool,

    /// Days allotted to the stage
    pub sla_days: u32,

    /// Documents still required before the stage can close
    #[serde(default)]
    pub pending_documents: Vec<String>,
}

impl Milestone {
    /// Create an open milestone with no dates.
    pub fn new(state: LifecycleState, sla_days: u32) -> Self {
        Self {
            id: MilestoneId::new(),
            state,
            planned_date: None,
            actual_date: None,
            completed: false,
            sla_days,
            pending_documents: Vec::new(),
        }
    }

    /// Set the planned date.
    pub fn with_planned_date(mut self, planned: Time) -> Self {
        self.planned_date = Some(planned);
        self
    }

    /// Add a required document.
    pub fn with_pending_document(mut self, doc: impl Into<String>) -> Self {
        self.pending_documents.push(doc.into());
        self
    }

    /// Mark the milestone done at `at`.
    pub fn complete(&mut self, at: Time) {
        self.completed = true;
        self.actual_date = Some(at);
    }

    /// Undo a completion. Clears the actual date with it.
    pub fn reopen(&mut self) {
        self.completed = false;
        self.actual_date = None;
    }

    /// Drop a document from the pending list. Returns false if it was not pending.
    pub fn resolve_document(&mut self, doc: &str) -> bool {
        let before = self.pending_documents.len();
        self.pending_documents.retain(|d| d != doc);
        self.pending_documents.len() != before
    }

    /// Completed on a later calendar day than planned.
    ///
    /// Milestones missing either date are never late.
    pub fn is_late(&self) -> bool {
        match (self.completed, self.actual_date, self.planned_date) {
            (true, Some(actual), Some(planned)) => actual.date_naive() > planned.date_naive(),
            _ => false,
        }
    }
}
