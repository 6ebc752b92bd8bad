//! Shared "view pipeline" used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load CSV -> derive fields -> summary stats
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{Dataset, DatasetStats, DerivedRecord, ViewConfig};
use crate::error::DataError;

/// Everything a single view needs: the freshly loaded dataset, the derived
/// columns aligned with it, and summary stats.
///
/// Views hold no state beyond this; a new `ViewData` is built per view, so
/// nothing is shared or cached between views.
#[derive(Debug, Clone)]
pub struct ViewData {
    pub dataset: Dataset,
    pub derived: Vec<DerivedRecord>,
    pub stats: DatasetStats,
}

/// Execute the full load/derive pipeline for one view.
pub fn run_view(config: &ViewConfig) -> Result<ViewData, DataError> {
    let dataset = crate::io::load(&config.csv_path)?;
    let derived = crate::normalize::derive(&dataset)?;
    let stats = crate::report::compute_stats(&dataset, &derived);

    Ok(ViewData {
        dataset,
        derived,
        stats,
    })
}
