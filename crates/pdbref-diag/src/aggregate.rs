//! Per-parameter diagnostics assembled from the summary table.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::summary::SummaryTable;

/// Auxiliary sampler variable that flags divergent transitions.
pub const DIVERGENCE_SIGNAL: &str = "divergent__";

/// Diagnostics describing a reference run.
///
/// The per-parameter vectors are aligned with `parameter_names`, and
/// `divergent_transitions` has one entry per chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsRecord {
    /// Parameter display names, in reporting order.
    pub parameter_names: Vec<String>,
    /// Retained draws across all chains.
    pub ndraws: usize,
    /// Number of chains.
    pub nchains: usize,
    /// Bulk ESS per parameter.
    pub ess_bulk: Vec<f64>,
    /// Tail ESS per parameter.
    pub ess_tail: Vec<f64>,
    /// R-hat per parameter.
    pub r_hat: Vec<f64>,
    /// Divergent transitions per chain.
    pub divergent_transitions: Vec<u64>,
}

/// Collects the summary statistics of `parameters` into a diagnostics record.
///
/// Parameters without a summary row take the neutral defaults (ESS 0,
/// R-hat 1) so every per-parameter vector keeps the same length.
pub fn aggregate<S, V>(
    parameters: &[S],
    summary: &SummaryTable,
    nchains: usize,
    ndraws: usize,
    method_variables: &[V],
) -> DiagnosticsRecord
where
    S: AsRef<str>,
    V: AsRef<str>,
{
    let mut record = DiagnosticsRecord {
        parameter_names: Vec::with_capacity(parameters.len()),
        ndraws,
        nchains,
        ess_bulk: Vec::with_capacity(parameters.len()),
        ess_tail: Vec::with_capacity(parameters.len()),
        r_hat: Vec::with_capacity(parameters.len()),
        divergent_transitions: divergent_transitions(nchains, method_variables),
    };
    for name in parameters {
        let name = name.as_ref();
        if summary.get(name).is_none() {
            warn!(parameter = name, "no summary row; using neutral diagnostics");
        }
        let row = summary.row_or_default(name);
        record.parameter_names.push(name.to_string());
        record.ess_bulk.push(row.ess_bulk);
        record.ess_tail.push(row.ess_tail);
        record.r_hat.push(row.r_hat);
    }
    record
}

/// Divergent-transition counts per chain.
///
/// Per-chain counts are not read from the sampler: the result is all zeros
/// whether or not the divergence signal is present. Zero here does not mean
/// no divergences occurred.
pub fn divergent_transitions<V: AsRef<str>>(nchains: usize, method_variables: &[V]) -> Vec<u64> {
    if method_variables
        .iter()
        .any(|name| name.as_ref() == DIVERGENCE_SIGNAL)
    {
        warn!(
            signal = DIVERGENCE_SIGNAL,
            "sampler reports divergences but per-chain counts are not propagated; recording zeros"
        );
    }
    vec![0; nchains]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::SummaryRow;

    #[test]
    fn divergences_are_zero_with_or_without_signal() {
        let none: [&str; 0] = [];
        assert_eq!(divergent_transitions(3, &none), vec![0, 0, 0]);
        assert_eq!(
            divergent_transitions(2, &["treedepth__", DIVERGENCE_SIGNAL]),
            vec![0, 0]
        );
    }

    #[test]
    fn missing_rows_use_neutral_defaults() {
        let mut summary = SummaryTable::new();
        summary.insert(
            "mu",
            SummaryRow {
                ess_bulk: 812.0,
                ess_tail: 640.0,
                r_hat: 1.002,
            },
        );
        let none: [&str; 0] = [];
        let record = aggregate(&["mu", "tau"], &summary, 4, 4000, &none);
        assert_eq!(record.ess_bulk, vec![812.0, 0.0]);
        assert_eq!(record.ess_tail, vec![640.0, 0.0]);
        assert_eq!(record.r_hat, vec![1.002, 1.0]);
        assert_eq!(record.divergent_transitions.len(), 4);
    }
}
