use std::fs;
use std::io::Write;
use std::path::Path;

use pdbref_core::errors::{ErrorInfo, PdbError};
use tempfile::NamedTempFile;

/// Writes `bytes` to `path` through a sibling temporary file.
///
/// The destination only ever holds the previous contents or the complete
/// new contents. The temporary file is removed on any failure.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PdbError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|err| write_error("pdbref_artifact.mkdir", err, parent))?;
    let mut tmp = NamedTempFile::new_in(parent)
        .map_err(|err| write_error("pdbref_artifact.tempfile", err, parent))?;
    tmp.write_all(bytes)
        .map_err(|err| write_error("pdbref_artifact.write", err, path))?;
    tmp.as_file()
        .sync_all()
        .map_err(|err| write_error("pdbref_artifact.sync", err, path))?;
    tmp.persist(path)
        .map_err(|err| write_error("pdbref_artifact.persist", err.error, path))?;
    Ok(())
}

fn write_error(code: &str, err: std::io::Error, path: &Path) -> PdbError {
    PdbError::ArtifactWrite(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}
