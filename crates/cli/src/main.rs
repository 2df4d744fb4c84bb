//! movetrack CLI - relocation shipment SLA tracking.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};
use movetrack_core::{LifecycleState, Shipment, Time};
use movetrack_integrations::{
    shipment_status_email, CrmClient, CrmSync, DispatchOutcome, EmailDispatcher, EmailSender,
    IntegrationConfig, SyncOutcome,
};
use movetrack_progress::{EvaluationRequest, EvaluatorConfig, ProgressTracker, SlaEvaluator};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "movetrack")]
#[command(about = "Relocation shipment SLA tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a shipment file with one milestone per stage
    Init {
        /// Business reference
        #[arg(long)]
        reference: String,
        /// Client name
        #[arg(long)]
        client: String,
        /// Client email
        #[arg(long)]
        email: Option<String>,
        /// Origin
        #[arg(long)]
        origin: String,
        /// Destination
        #[arg(long)]
        destination: String,
        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Output file
        #[arg(long, default_value = "shipment.json")]
        out: PathBuf,
    },
    /// Print SLA alerts for a shipment
    Evaluate {
        /// Shipment file
        file: PathBuf,
        /// Evaluation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Near-due window in days
        #[arg(long, default_value_t = EvaluatorConfig::default().near_due_days)]
        near_due_days: u32,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a progress and compliance report
    Report {
        /// Shipment file
        file: PathBuf,
        /// Evaluation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Mark a stage completed and save the file
    Complete {
        /// Shipment file
        file: PathBuf,
        /// Stage to complete
        #[arg(long)]
        stage: LifecycleState,
        /// Completion date (YYYY-MM-DD), defaults to now
        #[arg(long)]
        at: Option<NaiveDate>,
    },
    /// Email a status update to the client
    Notify {
        /// Shipment file
        file: PathBuf,
        /// Recipient, defaults to the client email
        #[arg(long)]
        to: Option<String>,
    },
    /// Push the shipment to the CRM
    Sync {
        /// Shipment file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { reference, client, email, origin, destination, start, out } => {
            let start = start.map(start_of_day).unwrap_or_else(Utc::now);
            let mut shipment = Shipment::new(reference, client, origin, destination, start);
            if let Some(email) = email {
                shipment = shipment.with_client_email(email);
            }
            save_shipment(&out, &shipment).await?;
            println!("Created shipment {} ({}) -> {}", shipment.id, shipment.reference, out.display());
        }
        Commands::Evaluate { file, today, near_due_days, json } => {
            let shipment = load_shipment(&file).await?;
            let request = EvaluationRequest {
                milestones: shipment.milestones,
                current_state: shipment.current_state,
                evaluated_on: today,
            };
            let response = request.evaluate_with(&SlaEvaluator::new(EvaluatorConfig { near_due_days }));

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!(
                    "Shipment {} [{}] on {}",
                    shipment.reference, request.current_state, response.evaluated_on
                );
                if response.alerts.is_empty() {
                    println!("  no alerts");
                }
                for alert in &response.alerts {
                    println!("  {:<7} {}", alert.severity.as_str().to_uppercase(), alert);
                }
            }
        }
        Commands::Report { file, today } => {
            let shipment = load_shipment(&file).await?;
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            let report = ProgressTracker::default().report(&shipment, today);

            println!("Shipment {} ({})", report.reference, report.shipment_id);
            println!("  Stage: {}", report.current_state.label());
            println!("  Progress: {:.0}%", report.progress_pct);
            println!(
                "  Completed: {}/{} ({} late)",
                report.compliance.completed, report.compliance.total, report.compliance.late
            );
            match report.compliance.compliance_pct {
                Some(pct) => println!("  SLA compliance: {}%", pct),
                None => println!("  SLA compliance: n/a"),
            }
            if let Some(eta) = report.estimated_completion {
                println!("  Estimated completion: {}", eta);
            }
            for alert in &report.alerts {
                println!("  {:<7} {}", alert.severity.as_str().to_uppercase(), alert);
            }
        }
        Commands::Complete { file, stage, at } => {
            let mut shipment = load_shipment(&file).await?;
            let at = at.map(start_of_day).unwrap_or_else(Utc::now);
            shipment.complete_stage(stage, at)?;
            save_shipment(&file, &shipment).await?;
            info!(shipment = %shipment.id, %stage, "stage completed");
            println!("Completed {}; now in {}", stage, shipment.current_state);
        }
        Commands::Notify { file, to } => {
            let shipment = load_shipment(&file).await?;
            let to = to
                .or_else(|| shipment.client_email.clone())
                .context("No recipient: pass --to or set client_email")?;
            let report = ProgressTracker::default().report(&shipment, Utc::now().date_naive());

            let dispatcher = EmailDispatcher::new(IntegrationConfig::from_env().email)?;
            match dispatcher.send(&shipment_status_email(&report, to)).await? {
                DispatchOutcome::Sent { id } => {
                    println!("Email sent{}", id.map(|i| format!(" ({})", i)).unwrap_or_default())
                }
                DispatchOutcome::NotConfigured => {
                    println!("Email not configured (set MOVETRACK_EMAIL_API_KEY)")
                }
            }
        }
        Commands::Sync { file } => {
            let shipment = load_shipment(&file).await?;
            let crm = CrmClient::new(IntegrationConfig::from_env().crm)?;
            match crm.sync_shipment(&shipment).await? {
                SyncOutcome::Synced { remote_id } => println!(
                    "Synced{}",
                    remote_id.map(|i| format!(" ({})", i)).unwrap_or_default()
                ),
                SyncOutcome::NotConfigured => {
                    println!("CRM not configured (set MOVETRACK_CRM_API_KEY)")
                }
            }
        }
    }

    Ok(())
}

fn start_of_day(date: NaiveDate) -> Time {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

async fn load_shipment(path: &Path) -> Result<Shipment> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid shipment file {}", path.display()))
}

async fn save_shipment(path: &Path, shipment: &Shipment) -> Result<()> {
    let json = serde_json::to_string_pretty(shipment)?;
    tokio::fs::write(path, json.as_bytes())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
