//! Structured error types shared across pdbref crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`PdbError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (parameter names, shapes, paths).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the pdbref pipeline.
///
/// `MalformedParameterName` and `ShapeMismatch` mean the sampler output does
/// not follow the assumed contract; both abort the invocation before any
/// artifact is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum PdbError {
    /// A parameter display name could not be parsed.
    #[error("malformed parameter name: {0}")]
    MalformedParameterName(ErrorInfo),
    /// Draw array dimensions disagree with the run configuration.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(ErrorInfo),
    /// A requested variable is absent from the draw matrix (strict mode only).
    #[error("missing variable: {0}")]
    MissingVariable(ErrorInfo),
    /// An output artifact could not be written.
    #[error("artifact write failure: {0}")]
    ArtifactWrite(ErrorInfo),
    /// Invalid or unreadable run configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Sampler output files could not be read or parsed.
    #[error("input error: {0}")]
    Input(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl PdbError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            PdbError::MalformedParameterName(info)
            | PdbError::ShapeMismatch(info)
            | PdbError::MissingVariable(info)
            | PdbError::ArtifactWrite(info)
            | PdbError::Config(info)
            | PdbError::Input(info) => info,
        }
    }

    /// Whether the sampler output broke the assumed name or shape layout.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            PdbError::MalformedParameterName(_) | PdbError::ShapeMismatch(_)
        )
    }
}
