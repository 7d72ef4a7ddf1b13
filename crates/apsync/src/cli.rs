//! Clap derive structures for the `apsync` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// apsync -- reconcile a Cisco WLC's access-point inventory into NetBox
#[derive(Debug, Parser)]
#[command(
    name = "apsync",
    version,
    about = "Sync access points from a Cisco wireless LAN controller into NetBox",
    long_about = "Scrapes `show ap config general` over an interactive SSH session,\n\
        extracts one record per access point, and converges NetBox toward the\n\
        discovered inventory: device types, devices, management interfaces,\n\
        and primary addresses. Sites are looked up by facility id, never created.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller hostname or address
    #[arg(long, env = "APSYNC_WLC_HOST", global = true)]
    pub wlc_host: Option<String>,

    /// Controller SSH port
    #[arg(long, env = "APSYNC_WLC_PORT", global = true)]
    pub wlc_port: Option<u16>,

    /// Controller SSH username
    #[arg(long, env = "APSYNC_WLC_USERNAME", global = true)]
    pub wlc_username: Option<String>,

    /// Controller SSH password
    #[arg(long, env = "APSYNC_WLC_PASSWORD", global = true, hide_env = true)]
    pub wlc_password: Option<String>,

    /// NetBox base URL
    #[arg(long, env = "APSYNC_NETBOX_URL", global = true)]
    pub netbox_url: Option<String>,

    /// NetBox API token
    #[arg(long, env = "APSYNC_NETBOX_TOKEN", global = true, hide_env = true)]
    pub netbox_token: Option<String>,

    /// Config file path (default: ./apsync.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Hard cap on one controller command, in seconds
    #[arg(long, env = "APSYNC_COMMAND_TIMEOUT", global = true)]
    pub command_timeout: Option<u64>,

    /// Output-silence window treated as command completion, in seconds
    #[arg(long, global = true)]
    pub inactivity_window: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one record per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape the controller and reconcile NetBox toward it
    Sync,

    /// Scrape the controller and print the discovered records (no writes)
    #[command(alias = "ls")]
    Show,
}
