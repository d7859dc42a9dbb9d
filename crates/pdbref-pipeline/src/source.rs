use std::fs;
use std::path::{Path, PathBuf};

use pdbref_core::errors::{ErrorInfo, PdbError};
use pdbref_diag::SummaryTable;
use pdbref_draws::RawDrawMatrix;

/// A completed run of the external sampler.
///
/// Implementations hand over merged draws, the per-parameter summary and
/// the names of the sampler's auxiliary (method) variables.
pub trait SamplerOutput {
    /// Merged draws keyed by base variable name, chain-major.
    fn draws(&self) -> Result<RawDrawMatrix, PdbError>;

    /// Summary statistics keyed by parameter display name.
    fn summary(&self) -> Result<SummaryTable, PdbError>;

    /// Names of auxiliary sampler variables such as `divergent__`.
    fn method_variables(&self) -> Result<Vec<String>, PdbError>;
}

/// Sampler output already held in memory.
#[derive(Debug, Clone, Default)]
pub struct SamplerRun {
    /// Merged draws.
    pub draws: RawDrawMatrix,
    /// Summary table.
    pub summary: SummaryTable,
    /// Auxiliary variable names.
    pub method_variables: Vec<String>,
}

impl SamplerOutput for SamplerRun {
    fn draws(&self) -> Result<RawDrawMatrix, PdbError> {
        Ok(self.draws.clone())
    }

    fn summary(&self) -> Result<SummaryTable, PdbError> {
        Ok(self.summary.clone())
    }

    fn method_variables(&self) -> Result<Vec<String>, PdbError> {
        Ok(self.method_variables.clone())
    }
}

/// Sampler output exported to disk.
///
/// * draws: JSON object mapping variable name to a flat or nested array;
/// * summary: summary CSV (see [`SummaryTable::from_csv_reader`]);
/// * method variables (optional): JSON array of names.
#[derive(Debug, Clone)]
pub struct FileSamplerOutput {
    /// Path of the draws JSON file.
    pub draws_path: PathBuf,
    /// Path of the summary CSV file.
    pub summary_path: PathBuf,
    /// Path of the method-variable list, if exported.
    pub method_variables_path: Option<PathBuf>,
}

impl FileSamplerOutput {
    /// Output with draws and summary but no method-variable list.
    pub fn new(draws_path: impl Into<PathBuf>, summary_path: impl Into<PathBuf>) -> Self {
        Self {
            draws_path: draws_path.into(),
            summary_path: summary_path.into(),
            method_variables_path: None,
        }
    }

    /// Adds the method-variable list.
    pub fn with_method_variables(mut self, path: impl Into<PathBuf>) -> Self {
        self.method_variables_path = Some(path.into());
        self
    }
}

impl SamplerOutput for FileSamplerOutput {
    fn draws(&self) -> Result<RawDrawMatrix, PdbError> {
        let bytes = read_input(&self.draws_path)?;
        RawDrawMatrix::from_json_slice(&bytes).map_err(|err| match err {
            PdbError::Input(info) => PdbError::Input(
                info.with_context("path", self.draws_path.display().to_string()),
            ),
            other => other,
        })
    }

    fn summary(&self) -> Result<SummaryTable, PdbError> {
        SummaryTable::from_csv_path(&self.summary_path)
    }

    fn method_variables(&self) -> Result<Vec<String>, PdbError> {
        let Some(path) = &self.method_variables_path else {
            return Ok(Vec::new());
        };
        let bytes = read_input(path)?;
        serde_json::from_slice(&bytes).map_err(|err| {
            PdbError::Input(
                ErrorInfo::new("pdbref_pipeline.method_variables_parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>, PdbError> {
    fs::read(path).map_err(|err| {
        PdbError::Input(
            ErrorInfo::new("pdbref_pipeline.read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}
