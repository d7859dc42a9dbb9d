use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use pdbref_core::errors::{ErrorInfo, PdbError};
use pdbref_core::{Provenance, RunConfig};
use pdbref_diag::{DiagnosticsRecord, QualityChecks};
use serde::{Deserialize, Serialize};

use crate::atomic::write_atomic;

/// Inference method recorded for sampler-generated references.
pub const SAMPLING_METHOD: &str = "stan_sampling";

/// Location of the metadata document for `posterior` under `dir`.
pub fn info_path(dir: &Path, posterior: &str) -> PathBuf {
    dir.join(format!("{posterior}.info.json"))
}

/// posteriordb reference-posterior metadata document.
///
/// Field names, nesting and order are a compatibility contract with the
/// posteriordb repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoDocument {
    pub name: String,
    pub inference: Inference,
    pub diagnostics: DiagnosticsSection,
    pub checks_made: QualityChecks,
    pub comments: String,
    pub added_by: String,
    pub added_date: String,
    pub versions: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inference {
    pub method: String,
    pub method_arguments: MethodArguments,
}

/// Sampler arguments; `iter` counts warmup plus un-thinned sampling iterations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodArguments {
    pub chains: usize,
    pub iter: usize,
    pub warmup: usize,
    pub thin: usize,
    pub seed: u64,
}

impl From<&RunConfig> for MethodArguments {
    fn from(config: &RunConfig) -> Self {
        Self {
            chains: config.chains,
            iter: config.iter_total(),
            warmup: config.warmup,
            thin: config.thin,
            seed: config.seed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticInformation {
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsSection {
    pub diagnostic_information: DiagnosticInformation,
    pub ndraws: usize,
    pub nchains: usize,
    pub effective_sample_size_bulk: Vec<f64>,
    pub effective_sample_size_tail: Vec<f64>,
    pub r_hat: Vec<f64>,
    pub divergent_transitions: Vec<u64>,
}

impl From<&DiagnosticsRecord> for DiagnosticsSection {
    fn from(record: &DiagnosticsRecord) -> Self {
        Self {
            diagnostic_information: DiagnosticInformation {
                names: record.parameter_names.clone(),
            },
            ndraws: record.ndraws,
            nchains: record.nchains,
            effective_sample_size_bulk: record.ess_bulk.clone(),
            effective_sample_size_tail: record.ess_tail.clone(),
            r_hat: record.r_hat.clone(),
            divergent_transitions: record.divergent_transitions.clone(),
        }
    }
}

impl InfoDocument {
    /// Assembles the document, evaluating the quality checks from `record`.
    pub fn build(
        name: impl Into<String>,
        config: &RunConfig,
        record: &DiagnosticsRecord,
        provenance: &Provenance,
    ) -> Self {
        Self {
            name: name.into(),
            inference: Inference {
                method: SAMPLING_METHOD.to_string(),
                method_arguments: MethodArguments::from(config),
            },
            diagnostics: DiagnosticsSection::from(record),
            checks_made: QualityChecks::evaluate(record),
            comments: provenance.comments.clone(),
            added_by: provenance.added_by.clone(),
            added_date: provenance.added_date.clone(),
            versions: provenance.versions.clone(),
        }
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, PdbError> {
        serde_json::to_string_pretty(self).map_err(|err| {
            PdbError::ArtifactWrite(
                ErrorInfo::new("pdbref_artifact.info_serialize", err.to_string())
                    .with_context("name", self.name.clone()),
            )
        })
    }

    /// Atomically writes the document to `path`.
    pub fn write(&self, path: &Path) -> Result<(), PdbError> {
        let json = self.to_json_pretty()?;
        write_atomic(path, json.as_bytes())
    }

    /// Loads a document from disk.
    pub fn load(path: &Path) -> Result<Self, PdbError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            PdbError::Input(
                ErrorInfo::new("pdbref_artifact.info_read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            PdbError::Input(
                ErrorInfo::new("pdbref_artifact.info_parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}
