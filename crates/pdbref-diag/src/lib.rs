//! Diagnostics aggregation for reference posterior runs.
//!
//! Effective sample sizes and R-hat values are taken verbatim from the
//! sampler's summary table; nothing here recomputes statistics.

pub mod aggregate;
pub mod checks;
pub mod summary;

pub use aggregate::{aggregate, divergent_transitions, DiagnosticsRecord, DIVERGENCE_SIGNAL};
pub use checks::QualityChecks;
pub use summary::{SummaryRow, SummaryTable, LOG_DENSITY_PREFIX};
