//! Node and edge types for the knowledge graph.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A position or offset on the render surface, in pixels.
///
/// Y grows downward, matching screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Length of this point taken as a vector.
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Multiply both components by `factor`.
    pub fn scale(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Learning status of a knowledge point.
///
/// Assigned by curriculum data or the host application; never derived
/// from mastery here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    /// Learner has mastered the point
    Mastered,
    /// Currently being studied
    Learning,
    /// Unlocked but not started
    #[default]
    Todo,
    /// Prerequisites not yet met
    Locked,
}

impl NodeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mastered => "mastered",
            Self::Learning => "learning",
            Self::Todo => "todo",
            Self::Locked => "locked",
        }
    }

    /// Chinese display name used by the learner-facing views.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Mastered => "已掌握",
            Self::Learning => "学习中",
            Self::Todo => "待学习",
            Self::Locked => "未解锁",
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of relationship between two knowledge points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// `from` must be learned before `to`
    Prerequisite,
    /// Points that are studied together
    Related,
    /// `to` applies `from`
    Application,
}

impl RelationKind {
    /// Get the relationship name for display.
    pub fn relation_name(self) -> &'static str {
        match self {
            Self::Prerequisite => "PREREQUISITE",
            Self::Related => "RELATED",
            Self::Application => "APPLICATION",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.relation_name())
    }
}

/// A knowledge point in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeNode {
    /// Stable identifier, unique within a stage.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Current position on the surface. Mutated by drag gestures.
    pub position: Point,
    /// Proficiency in `[0.0, 1.0]`.
    pub mastery: f32,
    /// Learning status.
    pub status: NodeStatus,
}

impl KnowledgeNode {
    /// Create a node with zero mastery and `Todo` status.
    pub fn new(id: impl Into<String>, label: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            position,
            mastery: 0.0,
            status: NodeStatus::Todo,
        }
    }

    pub fn with_mastery(mut self, mastery: f32) -> Self {
        self.mastery = clamp_mastery(mastery);
        self
    }

    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = status;
        self
    }
}

/// A directed relationship between two nodes, by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KnowledgeEdge {
    /// Source node id. For prerequisites, the point learned first.
    pub from: String,
    /// Target node id.
    pub to: String,
    /// Relationship kind.
    pub relation: RelationKind,
}

impl KnowledgeEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, relation: RelationKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            relation,
        }
    }

    /// `from` must be learned before `to`.
    pub fn prerequisite(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(from, to, RelationKind::Prerequisite)
    }
}

/// Clamp a mastery level into `[0, 1]`, mapping NaN to zero.
pub fn clamp_mastery(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
