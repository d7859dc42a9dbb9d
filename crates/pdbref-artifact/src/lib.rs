//! Writers for the two posteriordb reference artifacts.
//!
//! * `{name}.json.zip` holds a single deflated `{name}.json` entry with the
//!   per-chain draws.
//! * `{name}.info.json` holds the metadata document.
//!
//! Both are committed with a temp-file-then-rename so a failed write never
//! leaves a partial file under the final name.

pub mod archive;
pub mod atomic;
pub mod info;

use std::path::{Path, PathBuf};

use pdbref_core::PdbError;
use pdbref_draws::ChainDraws;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

pub use archive::{
    draws_archive_path, draws_entry_name, encode_draws_archive, read_draws_archive,
    write_draws_archive,
};
pub use atomic::write_atomic;
pub use info::{info_path, InfoDocument};

/// Locations of a written reference pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedArtifacts {
    /// Path of the draws archive.
    pub draws_path: PathBuf,
    /// Path of the metadata document.
    pub info_path: PathBuf,
    /// Hex SHA-256 of the draws archive bytes.
    pub draws_sha256: String,
}

/// Writes the draws archive and then the metadata document into `out_dir`.
pub fn save_artifacts(
    out_dir: &Path,
    chains: &[ChainDraws],
    document: &InfoDocument,
) -> Result<SavedArtifacts, PdbError> {
    let name = document.name.as_str();
    let bytes = encode_draws_archive(&draws_entry_name(name), chains)?;
    let draws_sha256 = hex::encode(Sha256::digest(&bytes));
    let draws_path = draws_archive_path(out_dir, name);
    write_atomic(&draws_path, &bytes)?;
    info!(path = %draws_path.display(), sha256 = %draws_sha256, "wrote draws archive");

    let info_path = info_path(out_dir, name);
    document.write(&info_path)?;
    info!(path = %info_path.display(), "wrote info document");

    Ok(SavedArtifacts {
        draws_path,
        info_path,
        draws_sha256,
    })
}
