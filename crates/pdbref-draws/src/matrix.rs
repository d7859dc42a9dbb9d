use std::collections::BTreeMap;

use pdbref_core::errors::{ErrorInfo, PdbError};
use serde::{Deserialize, Serialize};

use crate::chain::{nullable_rows, nullable_values};

/// Merged draws for one variable, chain-major along the first axis.
///
/// Scalars have shape `(total_draws,)`; vectors have shape
/// `(total_draws, dim)` and are stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ArrayRepr", into = "ArrayRepr")]
pub struct DrawArray {
    values: Vec<f64>,
    rows: usize,
    dim: Option<usize>,
}

impl DrawArray {
    /// One-dimensional draws of a scalar variable.
    pub fn scalar(values: Vec<f64>) -> Self {
        Self {
            rows: values.len(),
            values,
            dim: None,
        }
    }

    /// Two-dimensional draws given as one row per iteration.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, PdbError> {
        let dim = rows.first().map_or(0, Vec::len);
        if let Some((row, ragged)) = rows.iter().enumerate().find(|(_, r)| r.len() != dim) {
            return Err(PdbError::ShapeMismatch(
                ErrorInfo::new("pdbref_draws.ragged_rows", "draw rows differ in length")
                    .with_context("row", row.to_string())
                    .with_context("expected", dim.to_string())
                    .with_context("found", ragged.len().to_string()),
            ));
        }
        let count = rows.len();
        Ok(Self {
            values: rows.into_iter().flatten().collect(),
            rows: count,
            dim: Some(dim),
        })
    }

    /// Two-dimensional draws from a row-major buffer.
    pub fn from_row_major(values: Vec<f64>, dim: usize) -> Result<Self, PdbError> {
        if dim == 0 || values.len() % dim != 0 {
            return Err(PdbError::ShapeMismatch(
                ErrorInfo::new(
                    "pdbref_draws.row_major",
                    "buffer length is not a multiple of the dimension",
                )
                .with_context("len", values.len().to_string())
                .with_context("dim", dim.to_string()),
            ));
        }
        Ok(Self {
            rows: values.len() / dim,
            values,
            dim: Some(dim),
        })
    }

    /// Length of the first (draw) axis.
    pub fn total_draws(&self) -> usize {
        self.rows
    }

    /// Size of the second axis; `None` for scalars.
    pub fn dim(&self) -> Option<usize> {
        self.dim
    }

    /// Draw `row`; a single value for scalars. `row` must be below
    /// [`total_draws`](Self::total_draws).
    pub(crate) fn row(&self, row: usize) -> &[f64] {
        match self.dim {
            Some(dim) => &self.values[row * dim..(row + 1) * dim],
            None => std::slice::from_ref(&self.values[row]),
        }
    }

    pub(crate) fn values(&self) -> &[f64] {
        &self.values
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ArrayRepr {
    Scalar(#[serde(deserialize_with = "nullable_values")] Vec<f64>),
    Rows(#[serde(deserialize_with = "nullable_rows")] Vec<Vec<f64>>),
}

impl TryFrom<ArrayRepr> for DrawArray {
    type Error = PdbError;

    fn try_from(repr: ArrayRepr) -> Result<Self, Self::Error> {
        match repr {
            ArrayRepr::Scalar(values) => Ok(DrawArray::scalar(values)),
            ArrayRepr::Rows(rows) => DrawArray::from_rows(rows),
        }
    }
}

impl From<DrawArray> for ArrayRepr {
    fn from(array: DrawArray) -> Self {
        match array.dim {
            None => ArrayRepr::Scalar(array.values),
            Some(_) => ArrayRepr::Rows((0..array.rows).map(|r| array.row(r).to_vec()).collect()),
        }
    }
}

/// Draw arrays keyed by base variable name, as produced by the sampler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawDrawMatrix {
    variables: BTreeMap<String, DrawArray>,
}

impl RawDrawMatrix {
    /// Empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a variable.
    pub fn insert(&mut self, name: impl Into<String>, array: DrawArray) {
        self.variables.insert(name.into(), array);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, array: DrawArray) -> Self {
        self.insert(name, array);
        self
    }

    /// Looks up a variable by base name.
    pub fn get(&self, name: &str) -> Option<&DrawArray> {
        self.variables.get(name)
    }

    /// Variable names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the matrix holds no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Parses the JSON object form `{"name": [..] | [[..], ..]}`.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, PdbError> {
        serde_json::from_slice(bytes).map_err(|err| {
            PdbError::Input(ErrorInfo::new("pdbref_draws.matrix_parse", err.to_string()))
        })
    }
}

impl FromIterator<(String, DrawArray)> for RawDrawMatrix {
    fn from_iter<I: IntoIterator<Item = (String, DrawArray)>>(iter: I) -> Self {
        Self {
            variables: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_accepts_scalar_and_vector_variables() {
        let matrix = RawDrawMatrix::from_json_slice(
            br#"{"theta": [1.0, 2.0], "beta": [[1.0, 10.0], [2.0, 20.0]]}"#,
        )
        .expect("parse");
        let theta = matrix.get("theta").expect("theta");
        assert_eq!(theta.dim(), None);
        assert_eq!(theta.total_draws(), 2);
        let beta = matrix.get("beta").expect("beta");
        assert_eq!(beta.dim(), Some(2));
        assert_eq!(beta.row(1), &[2.0, 20.0]);
    }

    #[test]
    fn null_draws_read_as_nan() {
        let matrix =
            RawDrawMatrix::from_json_slice(br#"{"sigma": [1.0, null], "beta": [[null, 2.0]]}"#)
                .expect("parse");
        assert!(matrix.get("sigma").expect("sigma").row(1)[0].is_nan());
        assert!(matrix.get("beta").expect("beta").row(0)[0].is_nan());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = DrawArray::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).expect_err("ragged");
        assert!(matches!(err, PdbError::ShapeMismatch(_)));
        assert!(RawDrawMatrix::from_json_slice(br#"{"beta": [[1.0], [2.0, 3.0]]}"#).is_err());
    }
}
