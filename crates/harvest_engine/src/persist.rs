use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use harvest_logging::harvest_info;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::output_filename;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes `{dir}/{filename}` through a temp file and a rename, so an
/// interrupted write never leaves a truncated output behind.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &str, content: &[u8]) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Persist the accepted texts as a pretty-printed JSON array of strings.
pub fn write_json_array(
    dir: &Path,
    collection: &str,
    bodies: &[String],
) -> Result<PathBuf, PersistError> {
    let mut encoded = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut encoded, PrettyFormatter::with_indent(b"    "));
    bodies.serialize(&mut serializer)?;

    let writer = AtomicFileWriter::new(dir.to_path_buf());
    let path = writer.write(&output_filename(collection), &encoded)?;
    harvest_info!("Wrote {} items to {:?}", bodies.len(), path);
    Ok(path)
}
