//! Reporting and plotting helpers.
//!
//! Chart builders turn analysis results into `plotly::Plot` values, which
//! `write_plot_html` persists as standalone HTML pages.
pub mod plots;

use std::path::Path;

use anyhow::{Context, Result};
use plotly::Plot;

/// Write `plot` as a self-contained HTML page.
pub fn write_plot_html<P: AsRef<Path>>(plot: &Plot, path: P) -> Result<()> {
    std::fs::write(&path, plot.to_html())
        .with_context(|| format!("Failed to write plot: {}", path.as_ref().display()))?;
    log::info!("Wrote {}", path.as_ref().display());
    Ok(())
}

