use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use pdbref_core::{PdbError, Provenance, RunConfig};
use pdbref_draws::{AssembleOptions, MissingVariablePolicy};
use pdbref_pipeline::{generate_reference, save_reference, FileSamplerOutput};
use tracing::error;

use super::print_checks;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// posteriordb posterior name, e.g. `wells_data-wells_dist`.
    pub posterior: String,
    /// Draws JSON exported from the sampler (variable name to array).
    #[arg(long)]
    pub draws: PathBuf,
    /// Summary CSV exported from the sampler.
    #[arg(long)]
    pub summary: PathBuf,
    /// Optional JSON array of auxiliary sampler variable names.
    #[arg(long)]
    pub method_variables: Option<PathBuf>,
    /// YAML run configuration; posteriordb defaults when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Override the number of chains.
    #[arg(long)]
    pub chains: Option<usize>,
    /// Override the recorded seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output directory for the artifacts.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    /// Value recorded under `added_by`.
    #[arg(long)]
    pub added_by: Option<String>,
    /// Fail instead of omitting parameters whose variable has no draws.
    #[arg(long)]
    pub strict_missing: bool,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args)?;
    let mut output = FileSamplerOutput::new(&args.draws, &args.summary);
    if let Some(path) = &args.method_variables {
        output = output.with_method_variables(path);
    }
    let options = AssembleOptions {
        missing: if args.strict_missing {
            MissingVariablePolicy::Fail
        } else {
            MissingVariablePolicy::Omit
        },
    };

    let reference = generate_reference(&args.posterior, &output, &config, &options)
        .map_err(report_contract_violation)?;
    let mut provenance = Provenance::current();
    if let Some(added_by) = &args.added_by {
        provenance = provenance.with_added_by(added_by);
    }
    let saved = save_reference(&reference, &args.out, &provenance)?;

    println!("\nGenerated files:");
    println!("  Draws: {}", saved.draws_path.display());
    println!("  Info:  {}", saved.info_path.display());
    println!("\nSummary:");
    println!("  Parameters: {}", reference.diagnostics.parameter_names.len());
    println!("  Total draws: {}", reference.diagnostics.ndraws);
    println!("  Chains: {}", reference.diagnostics.nchains);
    if !reference.omitted.is_empty() {
        println!("  Omitted (no draws): {}", reference.omitted.join(", "));
    }
    print_checks(&reference.checks());
    Ok(())
}

fn load_config(args: &GenerateArgs) -> Result<RunConfig, PdbError> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(chains) = args.chains {
        config.chains = chains;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn report_contract_violation(err: PdbError) -> PdbError {
    if err.is_contract_violation() {
        error!(code = %err.info().code, "sampler output does not match the expected layout");
    }
    err
}
