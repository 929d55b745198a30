//! Persistence for externally supplied mastery levels.

mod error;
mod file;

pub use error::StorageError;
pub use file::FileMasteryStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::curriculum::Stage;
use crate::graph::KnowledgeGraph;

/// A learner's mastery of one knowledge point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasteryRecord {
    /// Stage the node id belongs to.
    pub stage: Stage,
    /// Knowledge node id.
    pub node_id: String,
    /// Proficiency in `[0.0, 1.0]`.
    pub level: f32,
    /// When the level was last recorded.
    pub updated_at: DateTime<Utc>,
}

/// Trait for mastery storage backends.
pub trait MasteryStore {
    /// Loads every stored record.
    fn load_all(&self) -> Result<Vec<MasteryRecord>, StorageError>;

    /// Gets the record for one node.
    fn get(&self, stage: Stage, node_id: &str) -> Result<Option<MasteryRecord>, StorageError>;

    /// Records a level for a node, replacing any previous one.
    ///
    /// Levels are clamped to `[0, 1]`; NaN is rejected.
    fn record(&self, stage: Stage, node_id: &str, level: f32)
        -> Result<MasteryRecord, StorageError>;

    /// Removes a node's record. Returns whether one existed.
    fn remove(&self, stage: Stage, node_id: &str) -> Result<bool, StorageError>;

    /// Records belonging to one stage.
    fn records_for(&self, stage: Stage) -> Result<Vec<MasteryRecord>, StorageError> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|r| r.stage == stage)
            .collect())
    }

    /// Apply this stage's stored levels to a graph. Returns how many matched.
    fn apply_to(&self, stage: Stage, graph: &mut KnowledgeGraph) -> Result<usize, StorageError> {
        let records = self.records_for(stage)?;
        Ok(graph.apply_mastery(records.iter().map(|r| (r.node_id.as_str(), r.level))))
    }
}
