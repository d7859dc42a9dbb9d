#![deny(missing_docs)]

//! End-to-end reference generation from a completed sampler run.

/// Draw reshaping, diagnostics and artifact emission.
pub mod pipeline;
/// The sampler-output collaborator seam.
pub mod source;

pub use pipeline::{generate_reference, save_reference, ReferenceRun};
pub use source::{FileSamplerOutput, SamplerOutput, SamplerRun};
