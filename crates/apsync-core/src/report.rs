//! Per-record outcomes and the batch report.
//!
//! Skip-and-continue and recover-from-conflict are modeled as explicit
//! variants collected into a [`RunReport`], not as exceptions threaded
//! through nested handlers.

use std::fmt;

use serde::Serialize;

/// What happened to one object kind during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Found,
    Created,
    Updated,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found => write!(f, "found"),
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
        }
    }
}

/// Why a record was skipped without touching the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "detail")]
pub enum SkipReason {
    /// The AP name encodes no facility id — the deliberate skip signal.
    NoFacilityId,
    /// No site exists for this facility id; sites are never created here.
    UnknownSite(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFacilityId => write!(f, "no facility id in name"),
            Self::UnknownSite(facility) => write!(f, "no site for facility {facility}"),
        }
    }
}

/// What a successful reconciliation did, per dependent object kind.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileSummary {
    pub device: String,
    pub site: String,
    pub device_action: Action,
    pub interface_action: Action,
    /// `None` when the record carried no IP address.
    pub address_action: Option<Action>,
}

/// Terminal state of one record's pass through the pipeline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase", tag = "outcome")]
pub enum Outcome {
    Skipped { skip: SkipReason },
    Reconciled { summary: ReconcileSummary },
    Failed { error: String },
}

/// One record, one outcome.
#[derive(Debug, Clone, Serialize)]
pub struct RecordReport {
    pub ap: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// The whole run's per-record log, in discovery order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub records: Vec<RecordReport>,
}

impl RunReport {
    pub fn push(&mut self, ap: impl Into<String>, outcome: Outcome) {
        self.records.push(RecordReport {
            ap: ap.into(),
            outcome,
        });
    }

    pub fn reconciled(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Reconciled { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.outcome)).count()
    }
}
