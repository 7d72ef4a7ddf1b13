//! `apsync sync` — the full pipeline: scrape, parse, reconcile, report.

use tracing::info;

use apsync_core::Reconciler;
use apsync_netbox::NetboxClient;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::{config, output};

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let config = config::load(global.config.as_deref())?;
    let wlc = config::resolve_wlc(global, &config)?;
    // Validate the inventory half before opening the controller session.
    let netbox = config::resolve_netbox(global, &config)?;

    let records = super::discover(&wlc).await?;

    let client = NetboxClient::new(netbox.url, &netbox.token)?;
    let mut engine = Reconciler::new(&client).await?;
    let report = engine.run(&records).await;

    info!(
        reconciled = report.reconciled(),
        skipped = report.skipped(),
        failed = report.failed(),
        "run complete"
    );
    output::print_output(&output::render_report(&global.output, &report), global.quiet);
    Ok(())
}
