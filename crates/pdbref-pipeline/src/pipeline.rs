use std::path::Path;

use pdbref_artifact::{save_artifacts, InfoDocument, SavedArtifacts};
use pdbref_core::{PdbError, Provenance, RunConfig};
use pdbref_diag::{aggregate, DiagnosticsRecord, QualityChecks};
use pdbref_draws::{assemble_draws, AssembleOptions, ChainDraws};
use tracing::info;

use crate::source::SamplerOutput;

/// Reshaped draws and diagnostics for one posterior, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRun {
    /// posteriordb posterior name, e.g. `eight_schools-eight_schools_noncentered`.
    pub name: String,
    /// Configuration the sampler ran with.
    pub config: RunConfig,
    /// Per-chain draws in chain order.
    pub chains: Vec<ChainDraws>,
    /// Diagnostics over every summarised parameter.
    pub diagnostics: DiagnosticsRecord,
    /// Summarised parameters that had no draws and were left out.
    pub omitted: Vec<String>,
}

impl ReferenceRun {
    /// Quality checks over the diagnostics.
    pub fn checks(&self) -> QualityChecks {
        QualityChecks::evaluate(&self.diagnostics)
    }
}

/// Reshapes a completed sampler run into reference draws and diagnostics.
///
/// Parameters come from the summary table in its order, without the
/// log-density entry. Nothing is written; see [`save_reference`].
pub fn generate_reference(
    name: &str,
    output: &dyn SamplerOutput,
    config: &RunConfig,
    options: &AssembleOptions,
) -> Result<ReferenceRun, PdbError> {
    config.validate()?;
    let summary = output.summary()?;
    let parameters = summary.parameter_names();
    let matrix = output.draws()?;
    info!(
        posterior = name,
        parameters = parameters.len(),
        variables = matrix.len(),
        "assembling reference draws"
    );
    let assembly = assemble_draws(&parameters, &matrix, config, options)?;
    let method_variables = output.method_variables()?;
    let diagnostics = aggregate(
        &parameters,
        &summary,
        config.chains,
        config.total_draws(),
        &method_variables,
    );
    Ok(ReferenceRun {
        name: name.to_string(),
        config: config.clone(),
        chains: assembly.chains,
        diagnostics,
        omitted: assembly.omitted,
    })
}

/// Writes the draws archive and metadata document for `run` into `out_dir`.
pub fn save_reference(
    run: &ReferenceRun,
    out_dir: &Path,
    provenance: &Provenance,
) -> Result<SavedArtifacts, PdbError> {
    let document = InfoDocument::build(&run.name, &run.config, &run.diagnostics, provenance);
    save_artifacts(out_dir, &run.chains, &document)
}
