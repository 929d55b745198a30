//! Arena-backed graph data store.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::models::{clamp_mastery, KnowledgeEdge, KnowledgeNode, Point, RelationKind};

/// Index of a node inside a [`KnowledgeGraph`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An edge whose endpoints have been resolved to arena indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEdge {
    pub from: NodeIndex,
    pub to: NodeIndex,
    pub relation: RelationKind,
}

/// In-memory knowledge graph for one curriculum stage.
///
/// Nodes live in an index-addressed arena; positions and mastery are
/// plain values updated by index. Prerequisite adjacency is derived from
/// the `Prerequisite` edges, so rendering and navigation share one source.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    nodes: Vec<KnowledgeNode>,
    edges: Vec<ResolvedEdge>,
    by_id: HashMap<String, NodeIndex>,
    /// prerequisites[i] = nodes that must be learned before node i
    prerequisites: Vec<Vec<NodeIndex>>,
    /// dependents[i] = nodes that list node i as a prerequisite
    dependents: Vec<Vec<NodeIndex>>,
}

impl KnowledgeGraph {
    /// Build a graph from node and edge snapshots.
    ///
    /// Duplicate node ids keep the first node. Edges referencing unknown
    /// ids and repeated edges are dropped.
    pub fn new(nodes: Vec<KnowledgeNode>, edges: Vec<KnowledgeEdge>) -> Self {
        let mut graph = Self::default();

        for mut node in nodes {
            if graph.by_id.contains_key(&node.id) {
                warn!(id = %node.id, "duplicate knowledge node id, keeping first");
                continue;
            }
            node.mastery = clamp_mastery(node.mastery);
            let idx = NodeIndex(graph.nodes.len());
            graph.by_id.insert(node.id.clone(), idx);
            graph.nodes.push(node);
        }

        graph.prerequisites = vec![Vec::new(); graph.nodes.len()];
        graph.dependents = vec![Vec::new(); graph.nodes.len()];

        let mut seen = HashSet::new();
        for edge in edges {
            let (Some(&from), Some(&to)) = (graph.by_id.get(&edge.from), graph.by_id.get(&edge.to))
            else {
                warn!(from = %edge.from, to = %edge.to, "edge references unknown node, skipping");
                continue;
            };

            if !seen.insert((from, to, edge.relation)) {
                continue;
            }

            if edge.relation == RelationKind::Prerequisite && from != to {
                graph.prerequisites[to.0].push(from);
                graph.dependents[from.0].push(to);
            }

            graph.edges.push(ResolvedEdge {
                from,
                to,
                relation: edge.relation,
            });
        }

        debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "knowledge graph built"
        );

        graph
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[KnowledgeNode] {
        &self.nodes
    }

    /// Iterate nodes together with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &KnowledgeNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeIndex(i), n))
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&KnowledgeNode> {
        self.nodes.get(idx.0)
    }

    /// Look up a node index by id.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    /// Look up the first node with the given display label.
    pub fn index_of_label(&self, label: &str) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .position(|n| n.label == label)
            .map(NodeIndex)
    }

    /// Resolved edges in insertion order.
    pub fn edges(&self) -> &[ResolvedEdge] {
        &self.edges
    }

    /// Move a node to an absolute position.
    pub fn set_position(&mut self, idx: NodeIndex, position: Point) {
        if let Some(node) = self.nodes.get_mut(idx.0) {
            node.position = position;
        }
    }

    /// Move a node by an offset.
    pub fn translate(&mut self, idx: NodeIndex, dx: f64, dy: f64) {
        if let Some(node) = self.nodes.get_mut(idx.0) {
            node.position = node.position + Point::new(dx, dy);
        }
    }

    /// Rewrite every node position with `f`.
    pub fn map_positions(&mut self, mut f: impl FnMut(Point) -> Point) {
        for node in &mut self.nodes {
            node.position = f(node.position);
        }
    }

    /// Update a node's mastery level.
    ///
    /// Returns `false` if no node has this id.
    pub fn set_mastery(&mut self, id: &str, level: f32) -> bool {
        match self.by_id.get(id) {
            Some(&idx) => {
                self.nodes[idx.0].mastery = clamp_mastery(level);
                true
            }
            None => false,
        }
    }

    /// Apply a batch of `(id, level)` mastery updates, returning how many matched.
    pub fn apply_mastery<'a, I>(&mut self, updates: I) -> usize
    where
        I: IntoIterator<Item = (&'a str, f32)>,
    {
        updates
            .into_iter()
            .filter(|(id, level)| self.set_mastery(id, *level))
            .count()
    }

    /// Direct prerequisites of a node.
    pub fn prerequisites_of(&self, idx: NodeIndex) -> &[NodeIndex] {
        self.prerequisites.get(idx.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes that directly depend on this node.
    pub fn dependents_of(&self, idx: NodeIndex) -> &[NodeIndex] {
        self.dependents.get(idx.0).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Arithmetic mean of all node positions, `None` for an empty graph.
    pub fn centroid(&self) -> Option<Point> {
        if self.nodes.is_empty() {
            return None;
        }
        let sum = self
            .nodes
            .iter()
            .fold(Point::default(), |acc, n| acc + n.position);
        let n = self.nodes.len() as f64;
        Some(Point::new(sum.x / n, sum.y / n))
    }
}
