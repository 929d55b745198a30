//! Knowledge graph model and interactive render surface.
//!
//! # Components
//!
//! - [`KnowledgeGraph`] - arena store of nodes and resolved edges, with the
//!   prerequisite adjacency derived from `Prerequisite` edges
//! - [`GraphSurface`] - hit-testing, drag, centering, zoom, highlight and
//!   rendering over a graph
//! - [`Canvas`] - drawing backend seam; [`DisplayList`] records draw calls
//!
//! # Example
//!
//! ```
//! use learnmap_core::graph::{
//!     DisplayList, GraphSurface, KnowledgeEdge, KnowledgeGraph, KnowledgeNode, Point,
//!     SurfaceSettings,
//! };
//! use std::time::Duration;
//!
//! let graph = KnowledgeGraph::new(
//!     vec![
//!         KnowledgeNode::new("add", "加法", Point::new(100.0, 100.0)),
//!         KnowledgeNode::new("mul", "乘法", Point::new(300.0, 100.0)),
//!     ],
//!     vec![KnowledgeEdge::prerequisite("add", "mul")],
//! );
//!
//! let mut surface = GraphSurface::new(graph, SurfaceSettings::default());
//! surface.center_graph();
//!
//! let mut canvas = DisplayList::new();
//! surface.render(&mut canvas, Duration::ZERO);
//! assert_eq!(canvas.filled_circles().count(), 2);
//! ```

mod canvas;
mod models;
mod store;
mod style;
mod surface;

pub use canvas::{Canvas, DisplayList, DrawCommand};
pub use models::{clamp_mastery, KnowledgeEdge, KnowledgeNode, NodeStatus, Point, RelationKind};
pub use store::{KnowledgeGraph, NodeIndex, ResolvedEdge};
pub use style::{
    dash_segments, edge_style, node_radius, status_color, EdgeStyle, LineDash, Rgb, GLOW_COLOR,
    LABEL_COLOR, SELECTION_COLOR,
};
pub use surface::{GraphSurface, PointerEvent, SurfaceSettings, ZoomDirection};
