use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use pdbref_core::errors::{ErrorInfo, PdbError};
use pdbref_draws::ChainDraws;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::atomic::write_atomic;

/// Name of the JSON entry inside the draws archive.
pub fn draws_entry_name(posterior: &str) -> String {
    format!("{posterior}.json")
}

/// Location of the draws archive for `posterior` under `dir`.
pub fn draws_archive_path(dir: &Path, posterior: &str) -> PathBuf {
    dir.join(format!("{posterior}.json.zip"))
}

/// Serializes the chains as a JSON array and deflates it into a one-entry
/// zip archive held in memory.
///
/// Non-finite draws are encoded as JSON `null`, which
/// [`read_draws_archive`] restores as NaN.
pub fn encode_draws_archive(entry_name: &str, chains: &[ChainDraws]) -> Result<Vec<u8>, PdbError> {
    let json = serde_json::to_vec(chains).map_err(|err| {
        PdbError::ArtifactWrite(ErrorInfo::new("pdbref_artifact.draws_json", err.to_string()))
    })?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    writer
        .start_file(entry_name, options)
        .map_err(|err| zip_error("pdbref_artifact.zip_entry", err.to_string(), entry_name))?;
    writer
        .write_all(&json)
        .map_err(|err| zip_error("pdbref_artifact.zip_write", err.to_string(), entry_name))?;
    let cursor = writer
        .finish()
        .map_err(|err| zip_error("pdbref_artifact.zip_finish", err.to_string(), entry_name))?;
    Ok(cursor.into_inner())
}

/// Encodes and atomically writes a draws archive.
pub fn write_draws_archive(
    path: &Path,
    entry_name: &str,
    chains: &[ChainDraws],
) -> Result<(), PdbError> {
    let bytes = encode_draws_archive(entry_name, chains)?;
    write_atomic(path, &bytes)
}

/// Reads the chains back from the first entry of a draws archive.
pub fn read_draws_archive(path: &Path) -> Result<Vec<ChainDraws>, PdbError> {
    let file = File::open(path).map_err(|err| read_error("pdbref_artifact.archive_open", err, path))?;
    let mut archive =
        ZipArchive::new(file).map_err(|err| read_error("pdbref_artifact.archive_parse", err, path))?;
    if archive.is_empty() {
        return Err(read_error(
            "pdbref_artifact.archive_empty",
            "archive has no entries",
            path,
        ));
    }
    let mut entry = archive
        .by_index(0)
        .map_err(|err| read_error("pdbref_artifact.archive_entry", err, path))?;
    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .map_err(|err| read_error("pdbref_artifact.archive_read", err, path))?;
    serde_json::from_slice(&bytes).map_err(|err| read_error("pdbref_artifact.draws_parse", err, path))
}

fn zip_error(code: &str, message: String, entry: &str) -> PdbError {
    PdbError::ArtifactWrite(ErrorInfo::new(code, message).with_context("entry", entry))
}

fn read_error(code: &str, err: impl ToString, path: &Path) -> PdbError {
    PdbError::Input(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}
