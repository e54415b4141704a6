// crates/countrydata-core/src/loader/store.rs
use crate::error::{LoadError, WriteError};
use crate::model::{Dataset, StoredDataset};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// The dataset JSON file.
///
/// Reads are whole-file. Writes go to a temp file in the same directory that
/// is renamed over the target, so a failed write never leaves a truncated
/// dataset behind.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    path: PathBuf,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<StoredDataset, LoadError> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound {
                path: self.path.clone(),
            },
            _ => LoadError::Io {
                path: self.path.clone(),
                source: e,
            },
        })?;

        let stored: StoredDataset =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| LoadError::Json {
                path: self.path.clone(),
                source: e,
            })?;

        debug!(
            path = %self.path.display(),
            countries = stored.countries.len(),
            "loaded existing dataset"
        );
        Ok(stored)
    }

    /// Replace the file with `dataset`, pretty-printed with two-space indent.
    pub fn save(&self, dataset: &Dataset) -> Result<(), WriteError> {
        let io_err = |source: io::Error| WriteError::Io {
            path: self.path.clone(),
            source,
        };

        // Serialize up front so an encoding failure cannot leave a temp file.
        let mut bytes = serde_json::to_vec_pretty(dataset)?;
        bytes.push(b'\n');

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        // The temp file starts out owner-only; keep the target's mode instead.
        match std::fs::metadata(&self.path) {
            Ok(meta) => tmp
                .as_file()
                .set_permissions(meta.permissions())
                .map_err(io_err)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(io_err(e)),
        }
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            writer.write_all(&bytes).map_err(io_err)?;
            writer.flush().map_err(io_err)?;
        }
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "wrote dataset");
        Ok(())
    }
}
