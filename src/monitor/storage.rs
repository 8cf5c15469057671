use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::processor::NormalizedPair;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Existing log {path} is not a valid JSON array: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk log of normalized pairs: a single pretty-printed JSON array,
/// extended by reading the whole file back and rewriting it each cycle. The
/// rewrite goes through a temp file in the same directory and a rename so a
/// crash mid-write never truncates the existing log.
pub struct JsonLog {
    path: PathBuf,
}

impl JsonLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a batch to the log, creating the file if absent. A no-op for
    /// an empty batch. Cost is O(total log size) per call.
    pub fn append(&self, records: &[NormalizedPair]) -> Result<(), StorageError> {
        if records.is_empty() {
            return Ok(());
        }

        let mut combined = self.read_existing()?;
        combined.extend_from_slice(records);
        self.rewrite(&combined)
    }

    fn read_existing(&self) -> Result<Vec<NormalizedPair>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn rewrite(&self, records: &[NormalizedPair]) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(records).expect("NormalizedPair always serializes");

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(io_err)?;
        fs::rename(&tmp_path, &self.path).map_err(io_err)?;

        Ok(())
    }
}
