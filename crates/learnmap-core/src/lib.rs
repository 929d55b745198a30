//! Curriculum knowledge graphs for learners.
//!
//! - [`curriculum`] - per-stage knowledge point tables loaded from YAML
//! - [`graph`] - arena graph store and the interactive render surface
//! - [`navigator`] - prerequisite lookups and learning paths
//! - [`storage`] - persisted mastery levels

pub mod config;
pub mod curriculum;
pub mod graph;
pub mod navigator;
pub mod storage;

pub use config::{Config, ConfigError, CurriculumConfig, StorageConfig, SurfaceConfig};
pub use curriculum::{resolve_stage, CurriculumCatalog, CurriculumError, Stage, StageData};
pub use graph::{
    GraphSurface, KnowledgeEdge, KnowledgeGraph, KnowledgeNode, NodeIndex, NodeStatus, Point,
    RelationKind, SurfaceSettings,
};
pub use navigator::{NavigationPlan, NavigatorError, PrerequisiteNavigator};
pub use storage::{FileMasteryStore, MasteryRecord, MasteryStore, StorageError};
