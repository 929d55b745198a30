//! JSON export of a stage graph.
//!
//! The shape follows Graphology's serialized form (`nodes[].key` +
//! `attributes`, `edges[].source/target`) so the output can be dropped
//! into any Sigma.js/Graphology front-end.

use serde::Serialize;

use learnmap_core::graph::{edge_style, status_color, GraphSurface};
use learnmap_core::Stage;

// =============================================================================
// Export Models
// =============================================================================

/// Full graph export.
#[derive(Debug, Serialize)]
pub struct GraphData {
    pub stage: Stage,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// A node in the export.
#[derive(Debug, Serialize)]
pub struct GraphNode {
    /// Knowledge node id.
    pub key: String,
    /// Visual and learning attributes.
    pub attributes: NodeAttributes,
}

/// Node attributes for rendering and display.
#[derive(Debug, Serialize)]
pub struct NodeAttributes {
    /// Display label.
    pub label: String,
    /// Learning status (mastered, learning, todo, locked).
    pub status: String,
    /// Mastery level in [0, 1].
    pub mastery: f32,
    /// Hex fill color.
    pub color: String,
    /// Node radius in pixels.
    pub size: f64,
    pub x: f64,
    pub y: f64,
}

/// An edge in the export.
#[derive(Debug, Serialize)]
pub struct GraphEdge {
    /// Source node key.
    pub source: String,
    /// Target node key.
    pub target: String,
    pub attributes: EdgeAttributes,
}

/// Edge attributes for rendering.
#[derive(Debug, Serialize)]
pub struct EdgeAttributes {
    /// Relationship kind (PREREQUISITE, RELATED, APPLICATION).
    /// Named "relationship" to stay clear of Sigma's edge `type`.
    pub relationship: String,
    /// Hex stroke color.
    pub color: String,
}

// =============================================================================
// Builder
// =============================================================================

/// Build export data from the current surface layout.
pub fn build(stage: Stage, surface: &GraphSurface) -> GraphData {
    let graph = surface.graph();

    let nodes = graph
        .iter()
        .map(|(idx, node)| GraphNode {
            key: node.id.clone(),
            attributes: NodeAttributes {
                label: node.label.clone(),
                status: node.status.to_string(),
                mastery: node.mastery,
                color: status_color(node.status).hex(),
                size: surface.radius_of(idx).unwrap_or_default(),
                x: node.position.x,
                y: node.position.y,
            },
        })
        .collect();

    let edges = graph
        .edges()
        .iter()
        .filter_map(|edge| {
            let source = graph.node(edge.from)?;
            let target = graph.node(edge.to)?;
            Some(GraphEdge {
                source: source.id.clone(),
                target: target.id.clone(),
                attributes: EdgeAttributes {
                    relationship: edge.relation.relation_name().to_string(),
                    color: edge_style(edge.relation).color.hex(),
                },
            })
        })
        .collect();

    GraphData {
        stage,
        nodes,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnmap_core::graph::{
        KnowledgeEdge, KnowledgeGraph, KnowledgeNode, NodeStatus, Point, RelationKind,
        SurfaceSettings,
    };

    fn surface() -> GraphSurface {
        let graph = KnowledgeGraph::new(
            vec![
                KnowledgeNode::new("a", "加法", Point::new(10.0, 20.0))
                    .with_mastery(1.0)
                    .with_status(NodeStatus::Mastered),
                KnowledgeNode::new("b", "乘法", Point::new(30.0, 40.0)),
            ],
            vec![
                KnowledgeEdge::prerequisite("a", "b"),
                KnowledgeEdge::new("b", "zzz", RelationKind::Related),
            ],
        );
        GraphSurface::new(graph, SurfaceSettings::default())
    }

    #[test]
    fn test_build_export() {
        let surface = surface();
        let data = build(Stage::Primary, &surface);

        assert_eq!(data.nodes.len(), 2);
        assert_eq!(data.edges.len(), 1);
        assert_eq!(data.nodes[0].attributes.status, "mastered");
        assert_eq!(data.nodes[0].attributes.size, surface.settings().node_radius_max);
        assert_eq!(data.edges[0].attributes.relationship, "PREREQUISITE");
    }

    #[test]
    fn test_export_json_shape() {
        let data = build(Stage::Junior, &surface());
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["stage"], "junior");
        assert_eq!(json["nodes"][1]["key"], "b");
        assert_eq!(json["nodes"][1]["attributes"]["label"], "乘法");
        assert_eq!(json["edges"][0]["source"], "a");
        assert_eq!(json["edges"][0]["target"], "b");
    }
}
