//! apsync — reconcile a Cisco WLC's access-point inventory into NetBox.

mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, GlobalOpts};

/// One record at a time end to end; nothing here needs worker threads.
#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.global);

    match cli.command {
        Command::Sync => commands::sync::handle(&cli.global).await,
        Command::Show => commands::show::handle(&cli.global).await,
    }
    .into_diagnostic()?;

    Ok(())
}

/// Stderr logging; `-v` flags raise the level unless `RUST_LOG` is set.
fn init_tracing(global: &GlobalOpts) {
    let level = match global.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "apsync={level},apsync_core={level},apsync_netbox={level},apsync_wlc={level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
