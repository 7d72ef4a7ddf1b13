//! Output rendering: table, JSON, plain.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use apsync_core::{Outcome, RunReport};
use apsync_wlc::AccessPointRecord;

use crate::cli::OutputFormat;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "AP")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Facility")]
    facility: String,
}

impl From<&AccessPointRecord> for RecordRow {
    fn from(r: &AccessPointRecord) -> Self {
        Self {
            name: r.name.clone(),
            model: r.model.clone().unwrap_or_default(),
            serial: r.serial.clone().unwrap_or_default(),
            ip: r.ip_address.clone().unwrap_or_default(),
            mac: r.ethernet_mac.clone().unwrap_or_default(),
            facility: r.facility_id.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "AP")]
    ap: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

fn outcome_row(ap: &str, outcome: &Outcome) -> OutcomeRow {
    let (outcome, detail) = match outcome {
        Outcome::Skipped { skip } => ("skipped".to_owned(), skip.to_string()),
        Outcome::Reconciled { summary } => {
            let mut detail = format!(
                "device {}, interface {}",
                summary.device_action, summary.interface_action
            );
            if let Some(addr) = summary.address_action {
                detail.push_str(&format!(", address {addr}"));
            }
            ("reconciled".to_owned(), detail)
        }
        Outcome::Failed { error } => ("failed".to_owned(), error.clone()),
    };
    OutcomeRow {
        ap: ap.to_owned(),
        outcome,
        detail,
    }
}

// ── Renderers ───────────────────────────────────────────────────────

/// Render the discovered records (`show` subcommand).
pub fn render_records(format: &OutputFormat, records: &[AccessPointRecord]) -> String {
    match format {
        OutputFormat::Table => {
            let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => render_json(records),
        OutputFormat::Plain => records
            .iter()
            .map(|r| r.name.clone())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Render the per-record reconciliation report (`sync` subcommand).
pub fn render_report(format: &OutputFormat, report: &RunReport) -> String {
    match format {
        OutputFormat::Table => {
            let rows: Vec<OutcomeRow> = report
                .records
                .iter()
                .map(|r| outcome_row(&r.ap, &r.outcome))
                .collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            format!(
                "{table}\n{} reconciled, {} skipped, {} failed",
                report.reconciled(),
                report.skipped(),
                report.failed()
            )
        }
        OutputFormat::Json => render_json(report),
        OutputFormat::Plain => report
            .records
            .iter()
            .map(|r| {
                let row = outcome_row(&r.ap, &r.outcome);
                format!("{}\t{}\t{}", row.ap, row.outcome, row.detail)
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).expect("serialization should not fail")
}

/// Print to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}
