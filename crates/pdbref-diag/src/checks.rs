//! Pass/fail quality checks over a diagnostics record.

use serde::{Deserialize, Serialize};

use crate::aggregate::DiagnosticsRecord;

/// Total retained draws expected of a posteriordb reference.
pub const REQUIRED_NDRAWS: usize = 10_000;
/// Minimum number of chains.
pub const MIN_CHAINS: usize = 4;
/// Bulk ESS every parameter must strictly exceed.
pub const MIN_ESS_BULK: f64 = 400.0;
/// R-hat every parameter must stay strictly below.
pub const MAX_R_HAT: f64 = 1.01;

/// The `checks_made` block of a metadata document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityChecks {
    /// Exactly [`REQUIRED_NDRAWS`] draws.
    pub ndraws_is_10k: bool,
    /// At least [`MIN_CHAINS`] chains.
    pub nchains_is_gte_4: bool,
    /// Every bulk ESS above [`MIN_ESS_BULK`].
    pub ess_within_bounds: bool,
    /// Every R-hat below [`MAX_R_HAT`].
    pub r_hat_below_1_01: bool,
}

impl QualityChecks {
    /// Evaluates the checks. NaN statistics fail their check.
    pub fn evaluate(record: &DiagnosticsRecord) -> Self {
        Self {
            ndraws_is_10k: record.ndraws == REQUIRED_NDRAWS,
            nchains_is_gte_4: record.nchains >= MIN_CHAINS,
            ess_within_bounds: record.ess_bulk.iter().all(|&ess| ess > MIN_ESS_BULK),
            r_hat_below_1_01: record.r_hat.iter().all(|&r_hat| r_hat < MAX_R_HAT),
        }
    }

    /// Checks as `(name, passed)` pairs in document order.
    pub fn entries(&self) -> [(&'static str, bool); 4] {
        [
            ("ndraws_is_10k", self.ndraws_is_10k),
            ("nchains_is_gte_4", self.nchains_is_gte_4),
            ("ess_within_bounds", self.ess_within_bounds),
            ("r_hat_below_1_01", self.r_hat_below_1_01),
        ]
    }

    /// Whether every check passed.
    pub fn all_passed(&self) -> bool {
        self.entries().iter().all(|(_, passed)| *passed)
    }

    /// Names of the failing checks.
    pub fn failed(&self) -> Vec<&'static str> {
        self.entries()
            .into_iter()
            .filter(|(_, passed)| !passed)
            .map(|(name, _)| name)
            .collect()
    }
}
