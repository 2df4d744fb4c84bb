//! Milestone SLA compliance evaluation.
//!
//! The evaluator is a pure function of the milestone list, the shipment's
//! current stage and the evaluation date. It never fails: missing dates, an
//! empty list or a stage with no milestone simply produce fewer alerts.
//!
//! Alerts come out in a fixed order:
//! 1. deadline and document alerts for the current stage
//! 2. late completions across all completed stages
//! 3. perfect compliance, when every completed stage was on time

use chrono::{NaiveDate, Utc};
use movetrack_core::{Alert, AlertKind, LifecycleState, Milestone, Severity};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Evaluator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// A stage due within this many days (inclusive) raises a warning
    pub near_due_days: u32,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self { near_due_days: 2 }
    }
}

/// Milestone compliance evaluator.
#[derive(Debug, Clone, Default)]
pub struct SlaEvaluator {
    config: EvaluatorConfig,
}

impl SlaEvaluator {
    /// Create an evaluator.
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate a shipment's milestones as of `today`.
    pub fn evaluate(
        &self,
        milestones: &[Milestone],
        current_state: LifecycleState,
        today: NaiveDate,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();

        if let Some(current) = milestones.iter().find(|m| m.state == current_state) {
            self.current_stage_alerts(current, today, &mut alerts);
        }

        let completed = milestones.iter().filter(|m| m.completed).count();
        let late = milestones.iter().filter(|m| m.is_late()).count();

        if late > 0 {
            alerts.push(Alert::new(
                Severity::Warning,
                AlertKind::LateCompletions { count: late },
            ));
        }

        if compliance_pct(completed, late) == Some(100) {
            alerts.push(Alert::new(Severity::Info, AlertKind::FullCompliance));
        }

        debug!(
            state = %current_state,
            %today,
            milestones = milestones.len(),
            alerts = alerts.len(),
            "evaluated milestone SLAs"
        );
        alerts
    }

    /// Deadline and document alerts. A stage without a planned date is not evaluated.
    fn current_stage_alerts(&self, current: &Milestone, today: NaiveDate, alerts: &mut Vec<Alert>) {
        let Some(planned) = current.planned_date else {
            return;
        };

        let days = (planned.date_naive() - today).num_days();
        if days < 0 {
            alerts.push(Alert::new(
                Severity::Error,
                AlertKind::StageOverdue {
                    state: current.state,
                    days_overdue: -days,
                },
            ));
        } else if days <= i64::from(self.config.near_due_days) {
            alerts.push(Alert::new(
                Severity::Warning,
                AlertKind::StageDueSoon {
                    state: current.state,
                    days_remaining: days,
                },
            ));
        }

        if !current.pending_documents.is_empty() {
            alerts.push(Alert::new(
                Severity::Info,
                AlertKind::DocumentsPending {
                    state: current.state,
                    count: current.pending_documents.len(),
                },
            ));
        }
    }
}

/// Evaluate with the default configuration.
pub fn evaluate(milestones: &[Milestone], current_state: LifecycleState, today: NaiveDate) -> Vec<Alert> {
    SlaEvaluator::default().evaluate(milestones, current_state, today)
}

/// Share of completed stages finished on time, rounded to a whole percent.
///
/// `None` when nothing has been completed yet.
pub fn compliance_pct(completed: usize, late: usize) -> Option<u8> {
    if completed == 0 {
        return None;
    }
    let on_time = completed.saturating_sub(late);
    let pct = (100.0 * on_time as f64 / completed as f64).round();
    Some(pct.clamp(0.0, 100.0) as u8)
}

/// Evaluation request as received from a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// Milestones of one shipment
    pub milestones: Vec<Milestone>,

    /// Stage the shipment is in
    pub current_state: LifecycleState,

    /// Evaluation date, today (UTC) when absent
    #[serde(default)]
    pub evaluated_on: Option<NaiveDate>,
}

/// Evaluation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResponse {
    /// Date the alerts were computed for
    pub evaluated_on: NaiveDate,

    /// Ordered alerts
    pub alerts: Vec<Alert>,
}

impl EvaluationRequest {
    /// Run the request through an evaluator.
    pub fn evaluate_with(&self, evaluator: &SlaEvaluator) -> EvaluationResponse {
        let evaluated_on = self
            .evaluated_on
            .unwrap_or_else(|| Utc::now().date_naive());
        EvaluationResponse {
            evaluated_on,
            alerts: evaluator.evaluate(&self.milestones, self.current_state, evaluated_on),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use movetrack_core::Time;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 10).unwrap()
    }

    /// Noon on `today + offset` days.
    fn day(offset: i64) -> Time {
        let date = today() + Duration::days(offset);
        Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
    }

    fn current(offset: i64) -> Milestone {
        Milestone::new(LifecycleState::Customs, 7).with_planned_date(day(offset))
    }

    fn done(planned: i64, actual: i64) -> Milestone {
        let mut ms = Milestone::new(LifecycleState::Packing, 2).with_planned_date(day(planned));
        ms.complete(day(actual));
        ms
    }

    fn deadline_alerts(alerts: &[Alert]) -> Vec<&Alert> {
        alerts
            .iter()
            .filter(|a| {
                matches!(
                    a.kind,
                    AlertKind::StageOverdue { .. } | AlertKind::StageDueSoon { .. }
                )
            })
            .collect()
    }

    #[test]
    fn test_unmatched_state_skips_current_stage_rules() {
        let ms = vec![current(-5).with_pending_document("bill_of_lading")];
        let alerts = evaluate(&ms, LifecycleState::Delivery, today());
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_empty_list_yields_nothing() {
        assert!(evaluate(&[], LifecycleState::Inquiry, today()).is_empty());
    }

    #[test]
    fn test_planned_yesterday_is_overdue_by_one() {
        let alerts = evaluate(&[current(-1)], LifecycleState::Customs, today());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Error);
        assert_eq!(
            alerts[0].kind,
            AlertKind::StageOverdue { state: LifecycleState::Customs, days_overdue: 1 }
        );
        assert!(alerts[0].message().contains('1'));
    }

    #[test]
    fn test_planned_today_is_due_in_zero() {
        let alerts = evaluate(&[current(0)], LifecycleState::Customs, today());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Warning);
        assert_eq!(alerts[0].message(), "stage due in 0 days");
    }

    #[test]
    fn test_near_due_window_boundary() {
        let at_two = evaluate(&[current(2)], LifecycleState::Customs, today());
        assert_eq!(deadline_alerts(&at_two).len(), 1);
        assert_eq!(
            at_two[0].kind,
            AlertKind::StageDueSoon { state: LifecycleState::Customs, days_remaining: 2 }
        );

        let at_three = evaluate(&[current(3)], LifecycleState::Customs, today());
        assert!(deadline_alerts(&at_three).is_empty());
    }

    #[test]
    fn test_time_of_day_does_not_shift_the_day_count() {
        // Planned late tonight, evaluated against today's date: still due today.
        let tonight = Utc.from_utc_datetime(&today().and_hms_opt(23, 59, 0).unwrap());
        let early = Utc.from_utc_datetime(&today().and_hms_opt(0, 1, 0).unwrap());
        for planned in [tonight, early] {
            let ms = Milestone::new(LifecycleState::Customs, 7).with_planned_date(planned);
            let alerts = evaluate(&[ms], LifecycleState::Customs, today());
            assert_eq!(alerts[0].message(), "stage due in 0 days");
        }
    }

    #[test]
    fn test_pending_documents_reported_regardless_of_deadline() {
        for offset in [-4, 1, 30] {
            let ms = current(offset)
                .with_pending_document("passport")
                .with_pending_document("inventory");
            let alerts = evaluate(&[ms], LifecycleState::Customs, today());
            let docs: Vec<_> = alerts.iter().filter(|a| a.severity == Severity::Info).collect();
            assert_eq!(docs.len(), 1);
            assert!(docs[0].message().contains('2'));
        }
    }

    #[test]
    fn test_current_stage_without_planned_date_is_skipped() {
        let ms = Milestone::new(LifecycleState::Customs, 7)
            .with_pending_document("visa")
            .with_pending_document("inventory");
        let alerts = evaluate(&[ms], LifecycleState::Customs, today());
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_one_late_of_four_warns_without_full_compliance() {
        let ms = vec![done(-10, -11), done(-8, -8), done(-6, -7), done(-4, -2)];
        let alerts = evaluate(&ms, LifecycleState::Delivery, today());
        assert_eq!(
            alerts,
            vec![Alert::new(Severity::Warning, AlertKind::LateCompletions { count: 1 })]
        );
        assert_eq!(alerts[0].message(), "1 stages completed late");
        assert_eq!(compliance_pct(4, 1), Some(75));
    }

    #[test]
    fn test_all_on_time_celebrates() {
        let ms = vec![done(-10, -10), done(-8, -9), done(-6, -6)];
        let alerts = evaluate(&ms, LifecycleState::Delivery, today());
        assert_eq!(alerts, vec![Alert::new(Severity::Info, AlertKind::FullCompliance)]);
        assert!(alerts[0].message().contains("100% SLA compliance"));
    }

    #[test]
    fn test_completion_without_dates_counts_as_on_time() {
        let mut ms = Milestone::new(LifecycleState::Inquiry, 1);
        ms.complete(day(-3));
        let alerts = evaluate(&[ms], LifecycleState::Survey, today());
        assert_eq!(alerts, vec![Alert::new(Severity::Info, AlertKind::FullCompliance)]);
    }

    #[test]
    fn test_current_stage_alerts_precede_history() {
        let mut ms = vec![done(-10, -5), current(-2).with_pending_document("customs_form")];
        ms.push(done(-20, -20));
        let alerts = evaluate(&ms, LifecycleState::Customs, today());

        let severities: Vec<_> = alerts.iter().map(|a| a.severity).collect();
        assert_eq!(severities, vec![Severity::Error, Severity::Info, Severity::Warning]);
        assert!(matches!(alerts[2].kind, AlertKind::LateCompletions { count: 1 }));
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let ms = vec![done(-10, -5), current(1).with_pending_document("x")];
        let first = evaluate(&ms, LifecycleState::Customs, today());
        let second = evaluate(&ms, LifecycleState::Customs, today());
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_near_due_window() {
        let evaluator = SlaEvaluator::new(EvaluatorConfig { near_due_days: 5 });
        let alerts = evaluator.evaluate(&[current(4)], LifecycleState::Customs, today());
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Warning);
    }

    #[test]
    fn test_compliance_pct_rounding() {
        assert_eq!(compliance_pct(0, 0), None);
        assert_eq!(compliance_pct(3, 0), Some(100));
        assert_eq!(compliance_pct(3, 1), Some(67));
        assert_eq!(compliance_pct(3, 3), Some(0));
    }

    #[test]
    fn test_request_uses_given_date() {
        let request = EvaluationRequest {
            milestones: vec![current(-1)],
            current_state: LifecycleState::Customs,
            evaluated_on: Some(today()),
        };
        let response = request.evaluate_with(&SlaEvaluator::default());
        assert_eq!(response.evaluated_on, today());
        assert_eq!(response.alerts.len(), 1);
    }

    #[test]
    fn test_request_deserializes_without_date() {
        let json = r#"{"milestones":[],"current_state":"booking"}"#;
        let request: EvaluationRequest = serde_json::from_str(json).unwrap();
        assert!(request.evaluated_on.is_none());
        let response = request.evaluate_with(&SlaEvaluator::default());
        assert!(response.alerts.is_empty());
    }
}
