//! Provenance fields recorded in every metadata document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default `comments` entry for generated references.
pub const DEFAULT_COMMENTS: &str =
    "Generated by pdbref for models lacking posteriordb references";

/// Default `added_by` entry for generated references.
pub const DEFAULT_ADDED_BY: &str = "pdbref reference generator";

/// Who produced an artifact, when, and with which tool versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Free-form remark stored under `comments`.
    pub comments: String,
    /// Author or tool recorded under `added_by`.
    pub added_by: String,
    /// ISO-8601 calendar date (`YYYY-MM-DD`).
    pub added_date: String,
    /// Version strings keyed by component, kept in insertion order.
    pub versions: IndexMap<String, String>,
}

impl Provenance {
    /// Provenance stamped with today's local date and the running tool versions.
    pub fn current() -> Self {
        Self {
            comments: DEFAULT_COMMENTS.to_string(),
            added_by: DEFAULT_ADDED_BY.to_string(),
            added_date: chrono::Local::now().date_naive().to_string(),
            versions: default_versions(),
        }
    }

    /// Overrides the `added_by` entry.
    pub fn with_added_by(mut self, added_by: impl Into<String>) -> Self {
        self.added_by = added_by.into();
        self
    }

    /// Records an additional version entry, replacing any previous value.
    pub fn with_version(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.versions.insert(key.into(), value.into());
        self
    }
}

fn default_versions() -> IndexMap<String, String> {
    let mut versions = IndexMap::new();
    versions.insert(
        "pdbref_version".to_string(),
        env!("CARGO_PKG_VERSION").to_string(),
    );
    versions.insert(
        "platform".to_string(),
        format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH),
    );
    versions
}
