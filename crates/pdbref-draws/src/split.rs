use std::ops::Range;

use pdbref_core::errors::{ErrorInfo, PdbError};

use crate::chain::ParameterDraws;
use crate::matrix::DrawArray;

/// Row range of `chain` within a merged, chain-major draw axis.
///
/// `total_draws` must be a non-zero multiple of `chains * draws_per_chain`.
/// The sampler's chain-major layout is assumed, not verified.
pub fn chain_bounds(
    total_draws: usize,
    chain: usize,
    chains: usize,
    draws_per_chain: usize,
) -> Result<Range<usize>, PdbError> {
    let expected = chains.checked_mul(draws_per_chain).unwrap_or(0);
    if expected == 0 || total_draws == 0 || total_draws % expected != 0 {
        return Err(PdbError::ShapeMismatch(
            ErrorInfo::new(
                "pdbref_draws.chain_layout",
                "draw count is not a multiple of chains * draws_per_chain",
            )
            .with_context("total_draws", total_draws.to_string())
            .with_context("chains", chains.to_string())
            .with_context("draws_per_chain", draws_per_chain.to_string())
            .with_hint("chains and draws_per_chain must describe the sampler run"),
        ));
    }
    if chain >= chains {
        return Err(PdbError::ShapeMismatch(
            ErrorInfo::new("pdbref_draws.chain_index", "chain index out of range")
                .with_context("chain", chain.to_string())
                .with_context("chains", chains.to_string()),
        ));
    }
    let start = chain * draws_per_chain;
    Ok(start..start + draws_per_chain)
}

/// Copies one chain's draws out of a merged array.
///
/// `index` is the 1-based element of a vector variable. Without an index a
/// scalar variable yields its values and a vector variable yields whole rows.
pub fn split_chain(
    array: &DrawArray,
    chain: usize,
    chains: usize,
    draws_per_chain: usize,
    index: Option<usize>,
) -> Result<ParameterDraws, PdbError> {
    let rows = chain_bounds(array.total_draws(), chain, chains, draws_per_chain)?;
    match (array.dim(), index) {
        (None, None) => Ok(ParameterDraws::Scalar(array.values()[rows].to_vec())),
        (None, Some(index)) => Err(PdbError::ShapeMismatch(
            ErrorInfo::new(
                "pdbref_draws.index_on_scalar",
                "indexed parameter refers to a one-dimensional variable",
            )
            .with_context("index", index.to_string()),
        )),
        (Some(dim), Some(index)) => {
            if index == 0 || index > dim {
                return Err(PdbError::ShapeMismatch(
                    ErrorInfo::new("pdbref_draws.index_bounds", "index out of bounds")
                        .with_context("index", index.to_string())
                        .with_context("dim", dim.to_string()),
                ));
            }
            let column = index - 1;
            Ok(ParameterDraws::Scalar(
                rows.map(|row| array.row(row)[column]).collect(),
            ))
        }
        (Some(_), None) => Ok(ParameterDraws::Rows(
            rows.map(|row| array.row(row).to_vec()).collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_contiguous_and_cover_first_block() {
        assert_eq!(chain_bounds(6, 0, 2, 3).expect("c0"), 0..3);
        assert_eq!(chain_bounds(6, 1, 2, 3).expect("c1"), 3..6);
        // A multiple of the expected count keeps the leading block.
        assert_eq!(chain_bounds(12, 1, 2, 3).expect("c1"), 3..6);
    }

    #[test]
    fn bounds_reject_bad_layouts() {
        let err = chain_bounds(7, 0, 2, 3).expect_err("not a multiple");
        assert_eq!(err.info().code, "pdbref_draws.chain_layout");
        assert!(err.info().hint.is_some());
        assert!(chain_bounds(0, 0, 2, 3).is_err());
        assert!(chain_bounds(6, 2, 2, 3).is_err());
        assert!(chain_bounds(6, 0, 0, 3).is_err());
    }
}
