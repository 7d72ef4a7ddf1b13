//! Reconciliation logic between discovered access points and NetBox.
//!
//! This crate owns everything between "a parsed [`AccessPointRecord`]" and
//! "the NetBox object graph converged toward it":
//!
//! - **[`naming`]** — pure derivations that keep upstream data inside the
//!   remote API's constraints (slug charset, 64-char name ceiling, CIDR
//!   notation).
//! - **[`store::InventoryStore`]** — the contract the engine reconciles
//!   against: per-kind find / create / update primitives keyed by natural
//!   keys. Implemented for [`apsync_netbox::NetboxClient`]; tests drive the
//!   engine with an in-memory fake.
//! - **[`reconcile::Reconciler`]** — the per-record
//!   find-or-create-or-update sequence across sites, device types, roles,
//!   devices, interfaces, and addresses, with duplicate-key recovery and
//!   per-record failure isolation.
//! - **[`report`]** — explicit per-record outcome variants collected into a
//!   batch report, instead of exceptions threaded through handlers.

pub mod naming;
pub mod reconcile;
pub mod report;
pub mod store;

pub use apsync_wlc::AccessPointRecord;
pub use reconcile::Reconciler;
pub use report::{Action, Outcome, ReconcileSummary, RecordReport, RunReport, SkipReason};
pub use store::InventoryStore;
