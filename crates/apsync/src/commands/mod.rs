//! Subcommand handlers.

pub mod show;
pub mod sync;

use tracing::{debug, info};

use apsync_wlc::{AccessPointRecord, SHOW_AP_CONFIG_GENERAL, WlcSession, parse_ap_inventory};

use crate::config::WlcSettings;
use crate::error::CliError;

/// Connect, scrape the one extraction command, parse, tear down.
///
/// Shared by `sync` and `show` — the only difference between them is what
/// happens to the records afterward.
pub(crate) async fn discover(settings: &WlcSettings) -> Result<Vec<AccessPointRecord>, CliError> {
    let mut session = WlcSession::connect(
        &settings.host,
        settings.port,
        &settings.username,
        &settings.password,
        settings.session.clone(),
    )
    .await?;

    let raw = session.run(SHOW_AP_CONFIG_GENERAL).await?;
    if let Err(e) = session.close().await {
        debug!(error = %e, "session close failed (ignored)");
    }

    let records = parse_ap_inventory(&raw);
    info!(count = records.len(), "discovered access points");
    Ok(records)
}
