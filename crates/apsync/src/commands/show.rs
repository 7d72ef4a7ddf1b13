//! `apsync show` — scrape and print the discovered records, write nothing.

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::{config, output};

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let config = config::load(global.config.as_deref())?;
    let wlc = config::resolve_wlc(global, &config)?;
    let records = super::discover(&wlc).await?;
    output::print_output(&output::render_records(&global.output, &records), global.quiet);
    Ok(())
}
