//! Reading and writing the comparison dataset file

use super::Task;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse dataset {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize dataset: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write dataset {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Load every task record from a JSON array file
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Task>, DatasetError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let tasks: Vec<Task> = serde_json::from_str(&content).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Loaded {} tasks from {:?}", tasks.len(), path);
    Ok(tasks)
}

/// Write the task records back, pretty-printed with two-space indentation.
/// Non-ASCII text is written as-is.
pub fn save<P: AsRef<Path>>(path: P, tasks: &[Task]) -> Result<(), DatasetError> {
    let path = path.as_ref();
    let content = serde_json::to_string_pretty(tasks)?;
    std::fs::write(path, content).map_err(|source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Wrote {} tasks to {:?}", tasks.len(), path);
    Ok(())
}
