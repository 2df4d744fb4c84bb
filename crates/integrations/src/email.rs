//! Email dispatch.

use async_trait::async_trait;
use movetrack_progress::ShipmentReport;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::EmailConfig;
use crate::error::Result;
use crate::http::{build_client, check_base_url, endpoint, post_json};

/// An email to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipients
    pub to: Vec<String>,

    /// Subject line
    pub subject: String,

    /// HTML body
    pub html: String,
}

/// Result of a dispatch attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Accepted by the email service
    Sent {
        /// Provider message id, if returned
        id: Option<String>,
    },

    /// No API key configured; nothing was sent
    NotConfigured,
}

/// Something that can send email.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send a message.
    async fn send(&self, message: &EmailMessage) -> Result<DispatchOutcome>;
}

#[derive(Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

/// HTTP email dispatcher.
#[derive(Debug, Clone)]
pub struct EmailDispatcher {
    client: reqwest::Client,
    config: EmailConfig,
}

impl EmailDispatcher {
    /// Create a dispatcher.
    pub fn new(config: EmailConfig) -> Result<Self> {
        check_base_url(&config.base_url)?;
        let client = build_client(config.timeout)?;
        Ok(Self { client, config })
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }
}

#[async_trait]
impl EmailSender for EmailDispatcher {
    async fn send(&self, message: &EmailMessage) -> Result<DispatchOutcome> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            warn!(subject = %message.subject, "email dispatch not configured, skipping");
            return Ok(DispatchOutcome::NotConfigured);
        };

        let body = SendEmailBody {
            from: &self.config.from,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
        };
        let url = endpoint(&self.config.base_url, "emails");
        let reply = post_json(&self.client, &url, api_key, &body, "email").await?;

        let id = reply.get("id").and_then(|v| v.as_str()).map(str::to_string);
        info!(recipients = message.to.len(), id = ?id, "email sent");
        Ok(DispatchOutcome::Sent { id })
    }
}

/// Compose a status update for a shipment's client.
pub fn shipment_status_email(report: &ShipmentReport, to: impl Into<String>) -> EmailMessage {
    let subject = format!(
        "Shipment {}: {}",
        report.reference,
        report.current_state.label()
    );

    let mut html = format!(
        "<h2>Shipment {}</h2>\n<p>Current stage: <strong>{}</strong></p>\n<p>Progress: {:.0}%</p>\n",
        escape_html(&report.reference),
        report.current_state.label(),
        report.progress_pct,
    );
    if let Some(pct) = report.compliance.compliance_pct {
        html.push_str(&format!("<p>SLA compliance: {}%</p>\n", pct));
    }
    if let Some(eta) = report.estimated_completion {
        html.push_str(&format!("<p>Estimated completion: {}</p>\n", eta));
    }
    if !report.alerts.is_empty() {
        html.push_str("<ul>\n");
        for alert in &report.alerts {
            html.push_str(&format!(
                "<li>[{}] {}</li>\n",
                alert.severity.as_str(),
                escape_html(&alert.message())
            ));
        }
        html.push_str("</ul>\n");
    }

    EmailMessage {
        to: vec![to.into()],
        subject,
        html,
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use movetrack_core::{LifecycleState, Shipment};
    use movetrack_progress::ProgressTracker;

    fn report() -> ShipmentReport {
        let start = Utc.with_ymd_and_hms(2026, 7, 1, 9, 0, 0).unwrap();
        let shipment = Shipment::new("MV-<9>", "Eva", "Oslo", "Bergen", start);
        ProgressTracker::default().report(&shipment, start.date_naive())
    }

    #[test]
    fn test_status_email_lists_alerts() {
        let message = shipment_status_email(&report(), "eva@example.com");
        assert_eq!(message.to, vec!["eva@example.com".to_string()]);
        assert_eq!(message.subject, "Shipment MV-<9>: Inquiry");
        assert!(message.html.contains("MV-&lt;9&gt;"));
        assert!(message.html.contains("[warning] stage due in 1 days"));
        assert!(!message.html.contains("SLA compliance"));
    }

    #[test]
    fn test_status_email_for_closed_stage() {
        let mut report = report();
        report.current_state = LifecycleState::Closed;
        report.alerts.clear();
        let message = shipment_status_email(&report, "eva@example.com");
        assert!(message.subject.ends_with("Closed"));
        assert!(!message.html.contains("<ul>"));
    }

    #[tokio::test]
    async fn test_unconfigured_dispatcher_skips() {
        let dispatcher = EmailDispatcher::new(EmailConfig::default()).unwrap();
        assert!(!dispatcher.is_configured());
        let outcome = dispatcher
            .send(&shipment_status_email(&report(), "eva@example.com"))
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::NotConfigured);
    }
}
