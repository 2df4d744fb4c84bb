//! CRM sync - mirrors shipments as deals in the CRM.

use async_trait::async_trait;
use movetrack_core::Shipment;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::CrmConfig;
use crate::error::Result;
use crate::http::{build_client, check_base_url, endpoint, post_json};

/// Result of a sync attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// CRM accepted the upsert
    Synced {
        /// CRM record id, if returned
        remote_id: Option<String>,
    },

    /// No API key configured; nothing was sent
    NotConfigured,
}

/// Deal record pushed to the CRM.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealPayload {
    /// Our shipment id, used as the upsert key
    pub external_id: String,
    /// Deal name
    pub name: String,
    /// Lifecycle stage wire name
    pub stage: String,
    /// Client name
    pub client_name: String,
    /// Client email
    pub client_email: Option<String>,
    /// Origin
    pub origin: String,
    /// Destination
    pub destination: String,
    /// Completed milestones as a percentage
    pub progress_pct: f32,
}

impl From<&Shipment> for DealPayload {
    fn from(shipment: &Shipment) -> Self {
        Self {
            external_id: shipment.id.to_string(),
            name: format!("{} ({})", shipment.reference, shipment.client_name),
            stage: shipment.current_state.as_str().to_string(),
            client_name: shipment.client_name.clone(),
            client_email: shipment.client_email.clone(),
            origin: shipment.origin.clone(),
            destination: shipment.destination.clone(),
            progress_pct: shipment.progress_pct(),
        }
    }
}

/// Something that can mirror shipments into a CRM.
#[async_trait]
pub trait CrmSync: Send + Sync {
    /// Upsert the shipment's deal.
    async fn sync_shipment(&self, shipment: &Shipment) -> Result<SyncOutcome>;
}

/// HTTP CRM client.
#[derive(Debug, Clone)]
pub struct CrmClient {
    client: reqwest::Client,
    config: CrmConfig,
}

impl CrmClient {
    /// Create a client.
    pub fn new(config: CrmConfig) -> Result<Self> {
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
impl CrmSync for CrmClient {
    async fn sync_shipment(&self, shipment: &Shipment) -> Result<SyncOutcome> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            warn!(shipment = %shipment.id, "CRM sync not configured, skipping");
            return Ok(SyncOutcome::NotConfigured);
        };

        let payload = DealPayload::from(shipment);
        let url = endpoint(&self.config.base_url, "deals/upsert");
        let reply = post_json(&self.client, &url, api_key, &payload, "crm").await?;

        let remote_id = reply.get("id").and_then(|v| match v {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        info!(shipment = %shipment.id, remote_id = ?remote_id, "shipment synced to CRM");
        Ok(SyncOutcome::Synced { remote_id })
    }
}
