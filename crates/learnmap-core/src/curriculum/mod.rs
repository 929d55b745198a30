//! Curriculum catalog: per-stage knowledge point tables.
//!
//! Stage data is loaded from YAML rather than branching on grade strings.
//! A built-in catalog ships with the library; a custom file can replace it
//! through `curriculum.data_file`.

mod error;

pub use error::CurriculumError;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{CurriculumConfig, BUILTIN_CURRICULUM};
use crate::graph::{KnowledgeEdge, KnowledgeGraph, KnowledgeNode, NodeStatus, Point, RelationKind};

/// A curriculum stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// 小学
    Primary,
    /// 初中
    Junior,
    /// 高中
    Senior,
}

const SENIOR_MARKERS: &[&str] = &[
    "高中", "高一", "高二", "高三", "十年级", "十一年级", "十二年级", "senior", "high",
];
const JUNIOR_MARKERS: &[&str] = &[
    "初中", "初一", "初二", "初三", "七年级", "八年级", "九年级", "junior", "middle",
];
const PRIMARY_MARKERS: &[&str] = &[
    "小学", "一年级", "二年级", "三年级", "四年级", "五年级", "六年级", "primary",
];

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Primary, Stage::Junior, Stage::Senior];

    /// Map a learner's grade string to a stage.
    ///
    /// Matches on substrings, checking senior markers before primary ones
    /// since "十一年级" contains "一年级".
    pub fn from_grade(grade: &str) -> Option<Stage> {
        let grade = grade.trim().to_lowercase();
        let has = |markers: &[&str]| markers.iter().any(|m| grade.contains(m));

        if has(SENIOR_MARKERS) {
            Some(Stage::Senior)
        } else if has(JUNIOR_MARKERS) {
            Some(Stage::Junior)
        } else if has(PRIMARY_MARKERS) {
            Some(Stage::Primary)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Junior => "junior",
            Self::Senior => "senior",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Primary => "小学",
            Self::Junior => "初中",
            Self::Senior => "高中",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = CurriculumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s.trim())
            .ok_or_else(|| CurriculumError::UnknownStage(s.to_string()))
    }
}

/// A knowledge point as written in curriculum data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub mastery: f32,
    #[serde(default)]
    pub status: NodeStatus,
    /// Ids of the points that must be learned first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<String>,
}

/// A relationship as written in curriculum data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub relation: RelationKind,
}

/// Node and edge tables for one stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageData {
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl StageData {
    /// Node and edge snapshots for [`KnowledgeGraph::new`].
    ///
    /// Per-node prerequisite lists become `Prerequisite` edges, so the graph
    /// holds a single dependency representation.
    pub fn to_parts(&self) -> (Vec<KnowledgeNode>, Vec<KnowledgeEdge>) {
        let nodes = self
            .nodes
            .iter()
            .map(|entry| {
                KnowledgeNode::new(&entry.id, &entry.label, Point::new(entry.x, entry.y))
                    .with_mastery(entry.mastery)
                    .with_status(entry.status)
            })
            .collect();

        let edges = self
            .nodes
            .iter()
            .flat_map(|entry| {
                entry.prerequisites
                    .iter()
                    .map(move |p| KnowledgeEdge::prerequisite(p, &entry.id))
            })
            .chain(
                self.edges
                    .iter()
                    .map(|e| KnowledgeEdge::new(&e.from, &e.to, e.relation)),
            )
            .collect();

        (nodes, edges)
    }

    pub fn to_graph(&self) -> KnowledgeGraph {
        let (nodes, edges) = self.to_parts();
        KnowledgeGraph::new(nodes, edges)
    }
}

/// Lookup table from stage to its knowledge point data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurriculumCatalog {
    #[serde(default)]
    pub stages: BTreeMap<Stage, StageData>,
}

impl CurriculumCatalog {
    /// The catalog compiled into the library.
    pub fn builtin() -> Result<Self, CurriculumError> {
        Self::from_yaml_str(BUILTIN_CURRICULUM)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CurriculumError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CurriculumError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CurriculumError::io(path, e))?;
        let catalog = Self::from_yaml_str(&content)?;
        info!(path = %path.display(), stages = catalog.stages.len(), "curriculum loaded");
        Ok(catalog)
    }

    /// Load the configured catalog, or the built-in one.
    pub fn from_config(config: &CurriculumConfig) -> Result<Self, CurriculumError> {
        match &config.data_file {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    /// Stages present in the catalog, in order.
    pub fn stages(&self) -> impl Iterator<Item = Stage> + '_ {
        self.stages.keys().copied()
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageData> {
        self.stages.get(&stage)
    }

    /// Build the knowledge graph for a stage.
    pub fn load_graph(&self, stage: Stage) -> Result<KnowledgeGraph, CurriculumError> {
        let data = self
            .stage(stage)
            .ok_or(CurriculumError::StageNotFound(stage))?;
        debug!(%stage, nodes = data.nodes.len(), "loading stage graph");
        Ok(data.to_graph())
    }
}

/// Pick the stage for a grade string, falling back to the configured default.
pub fn resolve_stage(
    grade: Option<&str>,
    config: &CurriculumConfig,
) -> Result<Stage, CurriculumError> {
    if let Some(stage) = grade.and_then(Stage::from_grade) {
        return Ok(stage);
    }
    if let Some(grade) = grade {
        debug!(grade, default = %config.default_stage, "grade matched no stage, using default");
    }
    config.default_stage.parse()
}
