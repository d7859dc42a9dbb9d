#![deny(missing_docs)]
#![doc = "Shared building blocks for the pdbref reference-draw generator: the error surface, the sampler run configuration and artifact provenance."]

pub mod config;
pub mod errors;
pub mod provenance;

pub use config::RunConfig;
pub use errors::{ErrorInfo, PdbError};
pub use provenance::Provenance;
