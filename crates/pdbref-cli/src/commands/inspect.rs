use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use pdbref_artifact::{read_draws_archive, InfoDocument};

use super::print_checks;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Metadata document (`*.info.json`).
    pub info: PathBuf,
    /// Matching draws archive; chain and draw counts are cross-checked when given.
    #[arg(long)]
    pub draws: Option<PathBuf>,
}

pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let doc = InfoDocument::load(&args.info)?;
    println!("{}", doc.name);
    println!("  Parameters: {}", doc.diagnostics.diagnostic_information.names.len());
    println!("  Total draws: {}", doc.diagnostics.ndraws);
    println!("  Chains: {}", doc.diagnostics.nchains);
    if let Some(path) = &args.draws {
        let chains = read_draws_archive(path)?;
        if chains.len() != doc.diagnostics.nchains {
            return Err(format!(
                "archive holds {} chains but info document records {}",
                chains.len(),
                doc.diagnostics.nchains
            )
            .into());
        }
        println!("  Archive chains: {}", chains.len());
    }
    print_checks(&doc.checks_made);
    if !doc.checks_made.all_passed() {
        return Err("one or more quality checks failed".into());
    }
    Ok(())
}
