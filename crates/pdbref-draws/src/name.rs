use std::fmt::{self, Display};
use std::str::FromStr;

use pdbref_core::errors::{ErrorInfo, PdbError};

/// A parameter identifier split into its variable name and optional index.
///
/// Indices follow the sampler's 1-based convention. Only a single trailing
/// index is supported (`beta[2]`, not `beta[2,1]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParameterName {
    base: String,
    index: Option<usize>,
}

impl ParameterName {
    /// Name of a whole variable.
    pub fn scalar(base: impl Into<String>) -> Result<Self, PdbError> {
        let base = base.into();
        check_base(&base, &base)?;
        Ok(Self { base, index: None })
    }

    /// Name of one element of a vector variable.
    pub fn indexed(base: impl Into<String>, index: usize) -> Result<Self, PdbError> {
        let base = base.into();
        let display = format!("{base}[{index}]");
        check_base(&base, &display)?;
        if index == 0 {
            return Err(malformed(&display, "indices are 1-based"));
        }
        Ok(Self {
            base,
            index: Some(index),
        })
    }

    /// Variable name used to look up the merged draw array.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// 1-based element index, if any.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// 0-based column within the variable's second dimension.
    pub fn column(&self) -> Option<usize> {
        self.index.map(|index| index - 1)
    }
}

impl Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.base, index),
            None => f.write_str(&self.base),
        }
    }
}

impl FromStr for ParameterName {
    type Err = PdbError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        resolve(raw)
    }
}

/// Parses a display name such as `theta` or `theta[3]`.
pub fn resolve(raw: &str) -> Result<ParameterName, PdbError> {
    let Some(open) = raw.find('[') else {
        if raw.contains(']') {
            return Err(malformed(raw, "closing bracket without opening bracket"));
        }
        return ParameterName::scalar(raw);
    };
    let Some(inner) = raw[open + 1..].strip_suffix(']') else {
        return Err(malformed(raw, "index must be a single trailing bracket"));
    };
    let base = &raw[..open];
    if inner.is_empty() {
        return Err(malformed(raw, "empty index"));
    }
    if !inner.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed_index(
            raw,
            inner,
            "index must be a single non-negative integer",
        ));
    }
    // Leading zeros would not survive a display round trip.
    if inner.len() > 1 && inner.starts_with('0') {
        return Err(malformed_index(raw, inner, "index has leading zeros"));
    }
    let index = inner
        .parse::<usize>()
        .map_err(|err| malformed_index(raw, inner, &err.to_string()))?;
    check_base(base, raw)?;
    if index == 0 {
        return Err(malformed(raw, "indices are 1-based"));
    }
    Ok(ParameterName {
        base: base.to_string(),
        index: Some(index),
    })
}

fn check_base(base: &str, display: &str) -> Result<(), PdbError> {
    if base.is_empty() {
        return Err(malformed(display, "empty variable name"));
    }
    if base.contains(['[', ']']) {
        return Err(malformed(display, "variable name contains brackets"));
    }
    Ok(())
}

fn malformed(raw: &str, reason: &str) -> PdbError {
    PdbError::MalformedParameterName(
        ErrorInfo::new("pdbref_draws.malformed_name", reason).with_context("name", raw),
    )
}

fn malformed_index(raw: &str, index: &str, reason: &str) -> PdbError {
    PdbError::MalformedParameterName(
        ErrorInfo::new("pdbref_draws.malformed_name", reason)
            .with_context("name", raw)
            .with_context("index", index),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_and_indexed_names_resolve() {
        let theta = resolve("theta").expect("scalar");
        assert_eq!(theta.base(), "theta");
        assert_eq!(theta.index(), None);

        let beta = resolve("beta[3]").expect("indexed");
        assert_eq!(beta.base(), "beta");
        assert_eq!(beta.index(), Some(3));
        assert_eq!(beta.column(), Some(2));
    }

    #[test]
    fn malformed_names_are_rejected() {
        for raw in [
            "", "[1]", "beta[", "beta]", "beta[x]", "beta[1,2]", "beta[1]x", "beta[]", "beta[0]",
            "beta[-1]", "beta[[1]]", "beta[01]",
        ] {
            let err = resolve(raw).expect_err(raw);
            assert!(
                matches!(err, PdbError::MalformedParameterName(_)),
                "{raw}: {err:?}"
            );
        }
    }
}
