use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Draws of one parameter within one chain.
///
/// JSON has no encoding for non-finite numbers: they serialize as `null` and
/// `null` reads back as NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterDraws {
    /// One value per retained iteration.
    Scalar(#[serde(deserialize_with = "nullable_values")] Vec<f64>),
    /// One row per retained iteration, for an un-indexed vector variable.
    Rows(#[serde(deserialize_with = "nullable_rows")] Vec<Vec<f64>>),
}

pub(crate) fn nullable_values<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Option<f64>>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect())
}

pub(crate) fn nullable_rows<'de, D>(deserializer: D) -> Result<Vec<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Vec::<Vec<Option<f64>>>::deserialize(deserializer)?;
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(|value| value.unwrap_or(f64::NAN)).collect())
        .collect())
}

impl ParameterDraws {
    /// Number of iterations covered.
    pub fn len(&self) -> usize {
        match self {
            ParameterDraws::Scalar(values) => values.len(),
            ParameterDraws::Rows(rows) => rows.len(),
        }
    }

    /// Whether no iterations are covered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scalar values, if this is a scalar series.
    pub fn as_scalar(&self) -> Option<&[f64]> {
        match self {
            ParameterDraws::Scalar(values) => Some(values),
            ParameterDraws::Rows(_) => None,
        }
    }
}

/// One chain's draws keyed by parameter display name, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainDraws {
    parameters: IndexMap<String, ParameterDraws>,
}

impl ChainDraws {
    /// Empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the draws of `name`.
    pub fn insert(&mut self, name: impl Into<String>, draws: ParameterDraws) {
        self.parameters.insert(name.into(), draws);
    }

    /// Looks up the draws of a parameter by display name.
    pub fn get(&self, name: &str) -> Option<&ParameterDraws> {
        self.parameters.get(name)
    }

    /// Whether the chain holds `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Parameter names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether the chain holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Iterates `(name, draws)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterDraws)> {
        self.parameters
            .iter()
            .map(|(name, draws)| (name.as_str(), draws))
    }
}
