#![deny(missing_docs)]

//! Reshapes merged sampler draws into posteriordb's per-chain layout.

/// Draw assembly across all requested parameters and chains.
pub mod assemble;
/// Per-chain output containers.
pub mod chain;
/// Merged draw arrays as returned by the sampler.
pub mod matrix;
/// Parameter display-name parsing.
pub mod name;
/// Chain boundary arithmetic and slicing.
pub mod split;

pub use assemble::{assemble_draws, AssembleOptions, Assembly, MissingVariablePolicy};
pub use chain::{ChainDraws, ParameterDraws};
pub use matrix::{DrawArray, RawDrawMatrix};
pub use name::{resolve, ParameterName};
pub use split::{chain_bounds, split_chain};
