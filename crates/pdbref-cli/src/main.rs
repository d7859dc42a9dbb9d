use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    generate::{self, GenerateArgs},
    inspect::{self, InspectArgs},
    version,
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "pdbref", about = "posteriordb reference draw generator")]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reshape a completed sampler run into a draws archive and info document.
    Generate(GenerateArgs),
    /// Print the quality checks recorded in an info document.
    Inspect(InspectArgs),
    /// Print the tool version.
    Version,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Generate(args) => generate::run(&args),
        Command::Inspect(args) => inspect::run(&args),
        Command::Version => version::run(),
    }
}
