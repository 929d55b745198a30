//! Curriculum catalog error types.

use std::path::PathBuf;
use thiserror::Error;

use super::Stage;

/// Errors that can occur while loading curriculum data.
#[derive(Debug, Error)]
pub enum CurriculumError {
    /// Curriculum file could not be read.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Curriculum YAML is malformed.
    #[error("Failed to parse curriculum data: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Catalog has no table for the requested stage.
    #[error("No curriculum data for stage '{0}'")]
    StageNotFound(Stage),

    /// A stage name did not match any known stage.
    #[error("Unknown curriculum stage: {0}")]
    UnknownStage(String),
}

impl CurriculumError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CurriculumError::Io {
            path: path.into(),
            source,
        }
    }
}
