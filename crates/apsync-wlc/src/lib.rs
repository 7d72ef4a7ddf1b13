//! SSH session driver and output parser for Cisco wireless LAN controllers.
//!
//! The WLC exposes its inventory only through an interactive, paginated CLI.
//! This crate owns the three pieces needed to get structured data out of it:
//!
//! - **[`WlcSession`]** — a single authenticated SSH session with
//!   run-command-get-full-output semantics. One channel per command; the
//!   session itself survives across commands.
//! - **[`PageBuffer`]** — accumulates raw output chunks, strips the
//!   `--More--` pagination marker (even when split across reads), and tells
//!   the session when a continuation keystroke is owed.
//! - **[`parse_ap_inventory`]** — turns the raw text of
//!   `show ap config general` into a sequence of [`AccessPointRecord`]s.

pub mod error;
pub mod pager;
pub mod parse;
pub mod session;

pub use error::Error;
pub use pager::PageBuffer;
pub use parse::{AccessPointRecord, facility_id, parse_ap_inventory};
pub use session::{SessionConfig, WlcSession};

/// The one extraction command this tool issues against the controller.
pub const SHOW_AP_CONFIG_GENERAL: &str = "show ap config general";
