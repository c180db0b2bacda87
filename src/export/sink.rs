use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

use crate::errors::{ExportError, ExportResult};

use super::ExportArtifact;

/// Destination for an exported artifact
pub trait FileSink {
    /// Persist the artifact, returning where it ended up
    fn save(&self, artifact: &ExportArtifact) -> ExportResult<PathBuf>;
}

/// Writes artifacts into a directory, creating it if needed.
///
/// Bytes go to a temporary file in the same directory that is renamed over
/// the target once complete, so a failed write leaves any previous file
/// untouched.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSink for DirectorySink {
    fn save(&self, artifact: &ExportArtifact) -> ExportResult<PathBuf> {
        let path = self.dir.join(&artifact.filename);
        let write_error = |source| ExportError::Write {
            filename: path.display().to_string(),
            source,
        };

        if !self.dir.exists() {
            info!("Creating path: {:?}", self.dir);
            fs::create_dir_all(&self.dir).map_err(write_error)?;
        }

        let mut staged = NamedTempFile::new_in(&self.dir).map_err(write_error)?;
        staged.write_all(&artifact.bytes).map_err(write_error)?;
        staged.flush().map_err(write_error)?;
        staged
            .persist(&path)
            .map_err(|err| write_error(err.error))?;

        info!(
            "Wrote {} ({}, {} bytes)",
            path.display(),
            artifact.mime_type,
            artifact.bytes.len()
        );
        Ok(path)
    }
}

/// Keeps artifacts in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: RefCell<Vec<ExportArtifact>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifacts(&self) -> Vec<ExportArtifact> {
        self.saved.borrow().clone()
    }

    pub fn last(&self) -> Option<ExportArtifact> {
        self.saved.borrow().last().cloned()
    }
}

impl FileSink for MemorySink {
    fn save(&self, artifact: &ExportArtifact) -> ExportResult<PathBuf> {
        self.saved.borrow_mut().push(artifact.clone());
        Ok(PathBuf::from(&artifact.filename))
    }
}
