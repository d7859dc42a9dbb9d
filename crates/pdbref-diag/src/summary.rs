//! Per-parameter summary statistics supplied by the sampler.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use pdbref_core::errors::{ErrorInfo, PdbError};
use serde::{Deserialize, Serialize};

/// Prefix of the log-density pseudo-parameter excluded from reference draws.
pub const LOG_DENSITY_PREFIX: &str = "lp__";

/// Convergence statistics for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Bulk effective sample size.
    #[serde(default)]
    pub ess_bulk: f64,
    /// Tail effective sample size.
    #[serde(default)]
    pub ess_tail: f64,
    /// Potential scale reduction factor.
    #[serde(default = "neutral_r_hat")]
    pub r_hat: f64,
}

fn neutral_r_hat() -> f64 {
    1.0
}

impl Default for SummaryRow {
    fn default() -> Self {
        Self {
            ess_bulk: 0.0,
            ess_tail: 0.0,
            r_hat: neutral_r_hat(),
        }
    }
}

impl SummaryRow {
    /// Builds a row from named summary columns.
    ///
    /// A legacy `N_Eff` column takes precedence over `ESS_bulk` and `ESS_tail`.
    /// Absent statistics fall back to ESS 0 and R-hat 1.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut n_eff = None;
        let mut ess_bulk = None;
        let mut ess_tail = None;
        let mut r_hat = None;
        for (column, value) in fields {
            match column {
                "N_Eff" => n_eff = Some(value),
                "ESS_bulk" => ess_bulk = Some(value),
                "ESS_tail" => ess_tail = Some(value),
                "R_hat" => r_hat = Some(value),
                _ => {}
            }
        }
        let defaults = Self::default();
        Self {
            ess_bulk: n_eff.or(ess_bulk).unwrap_or(defaults.ess_bulk),
            ess_tail: n_eff.or(ess_tail).unwrap_or(defaults.ess_tail),
            r_hat: r_hat.unwrap_or(defaults.r_hat),
        }
    }
}

/// Summary rows keyed by parameter display name, in sampler order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryTable {
    rows: IndexMap<String, SummaryRow>,
}

impl SummaryTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the row of `name`.
    pub fn insert(&mut self, name: impl Into<String>, row: SummaryRow) {
        self.rows.insert(name.into(), row);
    }

    /// Row for `name`, if the sampler reported one.
    pub fn get(&self, name: &str) -> Option<&SummaryRow> {
        self.rows.get(name)
    }

    /// Row for `name`, or the neutral default.
    pub fn row_or_default(&self, name: &str) -> SummaryRow {
        self.rows.get(name).copied().unwrap_or_default()
    }

    /// Number of rows, log density included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parameter names in table order, without the log-density entry.
    pub fn parameter_names(&self) -> Vec<String> {
        self.rows
            .keys()
            .filter(|name| !name.starts_with(LOG_DENSITY_PREFIX))
            .cloned()
            .collect()
    }

    /// Reads a summary CSV: a header row, the parameter name in the first
    /// column, one statistic per remaining column. Lines starting with `#`
    /// are skipped and cells that do not parse as numbers count as absent.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, PdbError> {
        let mut csv = csv::ReaderBuilder::new()
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv
            .headers()
            .map_err(|err| PdbError::Input(summary_error("pdbref_diag.summary_header", err)))?
            .clone();
        let mut table = Self::new();
        for (line, record) in csv.records().enumerate() {
            let record = record.map_err(|err| {
                PdbError::Input(
                    summary_error("pdbref_diag.summary_record", err)
                        .with_context("record", line.to_string()),
                )
            })?;
            let Some(name) = record.get(0).filter(|name| !name.is_empty()) else {
                continue;
            };
            let fields = headers
                .iter()
                .zip(record.iter())
                .skip(1)
                .filter_map(|(column, cell)| cell.parse::<f64>().ok().map(|value| (column, value)));
            table.insert(name, SummaryRow::from_fields(fields));
        }
        Ok(table)
    }

    /// Reads a summary CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self, PdbError> {
        let file = File::open(path).map_err(|err| {
            PdbError::Input(
                summary_error("pdbref_diag.summary_open", err)
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_csv_reader(file).map_err(|err| match err {
            PdbError::Input(info) => {
                PdbError::Input(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }
}

impl FromIterator<(String, SummaryRow)> for SummaryTable {
    fn from_iter<I: IntoIterator<Item = (String, SummaryRow)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

fn summary_error(code: &str, err: impl ToString) -> ErrorInfo {
    ErrorInfo::new(code, err.to_string())
}
