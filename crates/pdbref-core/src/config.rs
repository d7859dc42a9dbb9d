//! Sampler run configuration and posteriordb defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, PdbError};

/// Parameters of the external sampler run the artifacts describe.
///
/// Defaults follow the posteriordb reference conventions: ten chains of
/// 10 000 post-warmup iterations thinned by ten, i.e. 1 000 retained draws per
/// chain and 10 000 in total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of independent chains.
    #[serde(default = "default_chains")]
    pub chains: usize,
    /// Retained (post-thinning) draws per chain.
    #[serde(default = "default_draws_per_chain")]
    pub draws_per_chain: usize,
    /// Warmup iterations per chain.
    #[serde(default = "default_warmup")]
    pub warmup: usize,
    /// Thinning interval applied to the sampling iterations.
    #[serde(default = "default_thin")]
    pub thin: usize,
    /// Master seed handed to the sampler.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_chains() -> usize {
    10
}

fn default_draws_per_chain() -> usize {
    1000
}

fn default_warmup() -> usize {
    10_000
}

fn default_thin() -> usize {
    10
}

fn default_seed() -> u64 {
    4711
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            chains: default_chains(),
            draws_per_chain: default_draws_per_chain(),
            warmup: default_warmup(),
            thin: default_thin(),
            seed: default_seed(),
        }
    }
}

impl RunConfig {
    /// Builds a configuration from sampler-style arguments, where
    /// `iter_sampling` counts iterations before thinning.
    pub fn from_sampling(
        chains: usize,
        iter_sampling: usize,
        iter_warmup: usize,
        thin: usize,
        seed: u64,
    ) -> Result<Self, PdbError> {
        if thin == 0 {
            return Err(invalid_field("thin", "thin must be positive"));
        }
        let config = Self {
            chains,
            draws_per_chain: iter_sampling / thin,
            warmup: iter_warmup,
            thin,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Total number of retained draws across all chains.
    ///
    /// Saturates for configurations that [`validate`](Self::validate) rejects.
    pub fn total_draws(&self) -> usize {
        self.chains.saturating_mul(self.draws_per_chain)
    }

    /// Sampling iterations per chain before thinning.
    pub fn iter_sampling(&self) -> usize {
        self.draws_per_chain.saturating_mul(self.thin)
    }

    /// Total iterations per chain, warmup included.
    pub fn iter_total(&self) -> usize {
        self.iter_sampling().saturating_add(self.warmup)
    }

    /// Checks the positivity invariants.
    pub fn validate(&self) -> Result<(), PdbError> {
        if self.chains == 0 {
            return Err(invalid_field("chains", "chains must be positive"));
        }
        if self.draws_per_chain == 0 {
            return Err(invalid_field(
                "draws_per_chain",
                "draws_per_chain must be positive",
            ));
        }
        if self.thin == 0 {
            return Err(invalid_field("thin", "thin must be positive"));
        }
        if self.chains.checked_mul(self.draws_per_chain).is_none() {
            return Err(invalid_field(
                "chains",
                "chains * draws_per_chain overflows the draw count",
            ));
        }
        if self
            .draws_per_chain
            .checked_mul(self.thin)
            .and_then(|sampling| sampling.checked_add(self.warmup))
            .is_none()
        {
            return Err(invalid_field(
                "thin",
                "draws_per_chain * thin + warmup overflows the iteration count",
            ));
        }
        Ok(())
    }

    /// Parses and validates a YAML configuration document.
    pub fn from_yaml_str(source: &str) -> Result<Self, PdbError> {
        let config: Self = serde_yaml::from_str(source).map_err(|err| {
            PdbError::Config(ErrorInfo::new("pdbref_core.config_parse", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, PdbError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            PdbError::Config(
                ErrorInfo::new("pdbref_core.config_read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&contents).map_err(|err| match err {
            PdbError::Config(info) => {
                PdbError::Config(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }
}

fn invalid_field(field: &str, message: &str) -> PdbError {
    PdbError::Config(
        ErrorInfo::new("pdbref_core.config_invalid", message).with_context("field", field),
    )
}
