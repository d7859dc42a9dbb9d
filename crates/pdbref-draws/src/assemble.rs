use pdbref_core::errors::{ErrorInfo, PdbError};
use pdbref_core::RunConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::chain::ChainDraws;
use crate::matrix::RawDrawMatrix;
use crate::name::resolve;
use crate::split::split_chain;

/// What to do with a requested parameter whose variable has no draws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingVariablePolicy {
    /// Drop the parameter from every chain.
    #[default]
    Omit,
    /// Abort with [`PdbError::MissingVariable`].
    Fail,
}

/// Knobs for [`assemble_draws`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembleOptions {
    /// Handling of parameters absent from the draw matrix.
    #[serde(default)]
    pub missing: MissingVariablePolicy,
}

/// Output of [`assemble_draws`].
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    /// One entry per chain, in chain index order.
    pub chains: Vec<ChainDraws>,
    /// Requested names dropped because their variable had no draws.
    pub omitted: Vec<String>,
}

/// Builds per-chain draws for every requested parameter.
///
/// `parameters` are display names as listed by the summary step, without the
/// log-density entry. Each chain receives the parameters in request order.
pub fn assemble_draws<S: AsRef<str>>(
    parameters: &[S],
    matrix: &RawDrawMatrix,
    config: &RunConfig,
    options: &AssembleOptions,
) -> Result<Assembly, PdbError> {
    let mut assembled = Vec::with_capacity(parameters.len());
    let mut omitted = Vec::new();
    for raw in parameters {
        let raw = raw.as_ref();
        let name = resolve(raw)?;
        let Some(array) = matrix.get(name.base()) else {
            match options.missing {
                MissingVariablePolicy::Omit => {
                    warn!(parameter = raw, "variable missing from draws; omitting");
                    omitted.push(raw.to_string());
                    continue;
                }
                MissingVariablePolicy::Fail => {
                    return Err(PdbError::MissingVariable(
                        ErrorInfo::new(
                            "pdbref_draws.missing_variable",
                            "requested parameter has no draws",
                        )
                        .with_context("parameter", raw)
                        .with_context("variable", name.base())
                        .with_hint("omit the strict missing-variable policy to skip it"),
                    ));
                }
            }
        };
        let slices = (0..config.chains)
            .map(|chain| {
                split_chain(
                    array,
                    chain,
                    config.chains,
                    config.draws_per_chain,
                    name.index(),
                )
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| with_parameter(err, raw))?;
        debug!(parameter = raw, chains = config.chains, "assembled draws");
        assembled.push((raw, slices));
    }

    let mut chains = empty_chains(config.chains)?;
    for (raw, slices) in assembled {
        for (draws, slice) in chains.iter_mut().zip(slices) {
            draws.insert(raw, slice);
        }
    }
    Ok(Assembly { chains, omitted })
}

fn empty_chains(count: usize) -> Result<Vec<ChainDraws>, PdbError> {
    let mut chains = Vec::new();
    chains.try_reserve_exact(count).map_err(|err| {
        PdbError::Config(
            ErrorInfo::new("pdbref_draws.chain_alloc", err.to_string())
                .with_context("chains", count.to_string()),
        )
    })?;
    chains.resize_with(count, ChainDraws::new);
    Ok(chains)
}

fn with_parameter(err: PdbError, parameter: &str) -> PdbError {
    match err {
        PdbError::ShapeMismatch(info) => {
            PdbError::ShapeMismatch(info.with_context("parameter", parameter))
        }
        other => other,
    }
}
