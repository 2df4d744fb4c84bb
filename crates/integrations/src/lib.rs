//! External integrations for movetrack.
//!
//! Email dispatch and CRM sync over HTTP. Each client is switched on by the
//! presence of its API key: without one, calls report
//! [`DispatchOutcome::NotConfigured`] / [`SyncOutcome::NotConfigured`] and no
//! request is made.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod email;
pub mod crm;
mod http;

pub use config::{IntegrationConfig, EmailConfig, CrmConfig};
pub use error::{IntegrationError, Result};
pub use email::{EmailDispatcher, EmailMessage, EmailSender, DispatchOutcome, shipment_status_email};
pub use crm::{CrmClient, CrmSync, SyncOutcome, DealPayload};
