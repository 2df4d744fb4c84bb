//! Compliance alerts - semantic payload only, no presentation.

use serde::{Deserialize, Serialize};
use crate::lifecycle::LifecycleState;

/// Severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational, no deadline at risk
    Info,
    /// Deadline approaching
    Warning,
    /// Deadline missed
    Error,
}

impl Severity {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// What an alert is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertKind {
    /// The current stage is past its planned date
    StageOverdue {
        /// Stage being evaluated
        state: LifecycleState,
        /// Whole days past the planned date
        days_overdue: i64,
    },

    /// The current stage is due within the near-due window
    StageDueSoon {
        /// Stage being evaluated
        state: LifecycleState,
        /// Whole days until the planned date
        days_remaining: i64,
    },

    /// The current stage still waits on documents
    DocumentsPending {
        /// Stage being evaluated
        state: LifecycleState,
        /// Number of outstanding documents
        count: usize,
    },

    /// Some completed stages finished after their planned date
    LateCompletions {
        /// Completed stages finished late
        count: usize,
    },

    /// Every completed stage finished on time
    FullCompliance,
}

/// An advisory alert produced by SLA evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// How urgent it is
    pub severity: Severity,

    /// What it is about
    pub kind: AlertKind,
}

impl Alert {
    /// Create an alert.
    pub fn new(severity: Severity, kind: AlertKind) -> Self {
        Self { severity, kind }
    }

    /// Default English copy for the alert.
    pub fn message(&self) -> String {
        match &self.kind {
            AlertKind::StageOverdue { days_overdue, .. } => {
                format!("stage overdue by {} days", days_overdue)
            }
            AlertKind::StageDueSoon { days_remaining, .. } => {
                format!("stage due in {} days", days_remaining)
            }
            AlertKind::DocumentsPending { count, .. } => {
                format!("{} documents pending for this stage", count)
            }
            AlertKind::LateCompletions { count } => format!("{} stages completed late", count),
            AlertKind::FullCompliance => "100% SLA compliance so far".to_string(),
        }
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}
