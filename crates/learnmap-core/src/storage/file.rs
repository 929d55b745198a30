use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use crate::config::StorageConfig;
use crate::curriculum::Stage;
use crate::graph::clamp_mastery;

use super::error::StorageError;
use super::{MasteryRecord, MasteryStore};

/// JSON file storage for mastery records.
///
/// ```text
/// .learnmap/
///   mastery.json     # [{stage, node_id, level, updated_at}, ...]
/// ```
pub struct FileMasteryStore {
    path: PathBuf,
}

impl FileMasteryStore {
    /// Creates a store at the configured mastery path.
    pub fn new(config: &StorageConfig) -> Self {
        Self::at(config.mastery_path())
    }

    /// Creates a store backed by a specific file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes all records, creating the parent directory if needed.
    fn save_all(&self, records: &[MasteryRecord]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
            }
        }

        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json).map_err(|e| StorageError::io(&self.path, e))?;

        Ok(())
    }
}

impl MasteryStore for FileMasteryStore {
    fn load_all(&self) -> Result<Vec<MasteryRecord>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let json = fs::read_to_string(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<MasteryRecord> = serde_json::from_str(&json)?;
        Ok(records)
    }

    fn get(&self, stage: Stage, node_id: &str) -> Result<Option<MasteryRecord>, StorageError> {
        Ok(self
            .load_all()?
            .into_iter()
            .find(|r| r.stage == stage && r.node_id == node_id))
    }

    fn record(
        &self,
        stage: Stage,
        node_id: &str,
        level: f32,
    ) -> Result<MasteryRecord, StorageError> {
        if level.is_nan() {
            return Err(StorageError::InvalidLevel {
                node_id: node_id.to_string(),
                level,
            });
        }

        let record = MasteryRecord {
            stage,
            node_id: node_id.to_string(),
            level: clamp_mastery(level),
            updated_at: Utc::now(),
        };

        let mut records = self.load_all()?;
        records.retain(|r| !(r.stage == stage && r.node_id == node_id));
        records.push(record.clone());
        self.save_all(&records)?;

        debug!(%stage, node_id, level = record.level, "mastery recorded");
        Ok(record)
    }

    fn remove(&self, stage: Stage, node_id: &str) -> Result<bool, StorageError> {
        let mut records = self.load_all()?;
        let before = records.len();
        records.retain(|r| !(r.stage == stage && r.node_id == node_id));

        if records.len() == before {
            return Ok(false);
        }

        self.save_all(&records)?;
        Ok(true)
    }
}
