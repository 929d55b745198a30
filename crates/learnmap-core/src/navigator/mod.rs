//! Prerequisite navigation and learning-path construction.
//!
//! Every request is recomputed from the graph's prerequisite adjacency;
//! the navigator holds no state of its own.

mod error;

pub use error::NavigatorError;

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DEFAULT_FALLBACK_PREREQUISITE;
use crate::graph::{KnowledgeGraph, NodeIndex};

/// Prerequisite count at or below which a node counts as basic.
const BASIC_MAX_PREREQUISITES: usize = 1;

/// Result of one navigation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationPlan {
    /// The requested knowledge point.
    pub target: String,
    /// Its direct prerequisites (or the fallback list).
    pub prerequisites: Vec<String>,
    /// Whether a "start learning" shortcut applies.
    pub offer_start: bool,
    /// The basic prerequisite to start from, when one exists.
    pub start: Option<String>,
    /// Suggested order, starting with `start`. Empty without a start point.
    pub path: Vec<String>,
}

/// Answers prerequisite questions against a [`KnowledgeGraph`].
#[derive(Debug, Clone)]
pub struct PrerequisiteNavigator<'g> {
    graph: &'g KnowledgeGraph,
    fallback: String,
}

impl<'g> PrerequisiteNavigator<'g> {
    /// Navigator using the default fallback label.
    pub fn new(graph: &'g KnowledgeGraph) -> Self {
        Self::with_fallback(graph, DEFAULT_FALLBACK_PREREQUISITE)
    }

    pub fn with_fallback(graph: &'g KnowledgeGraph, fallback: impl Into<String>) -> Self {
        Self {
            graph,
            fallback: fallback.into(),
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    fn label(&self, idx: NodeIndex) -> Option<&'g str> {
        self.graph.node(idx).map(|n| n.label.as_str())
    }

    /// Direct prerequisite labels of a knowledge point.
    ///
    /// Unknown labels yield the single fallback entry; a known point with
    /// no prerequisites yields an empty list.
    pub fn prerequisites_for(&self, label: &str) -> Vec<String> {
        match self.graph.index_of_label(label) {
            Some(idx) => self
                .graph
                .prerequisites_of(idx)
                .iter()
                .filter_map(|&p| self.label(p))
                .map(str::to_string)
                .collect(),
            None => vec![self.fallback.clone()],
        }
    }

    /// Number of direct prerequisites, counted the same way as
    /// [`prerequisites_for`](Self::prerequisites_for).
    pub fn prerequisite_count(&self, label: &str) -> usize {
        self.prerequisites_for(label).len()
    }

    /// The first direct prerequisite that is itself basic.
    pub fn basic_node(&self, label: &str) -> Option<String> {
        self.prerequisites_for(label)
            .into_iter()
            .find(|p| self.prerequisite_count(p) <= BASIC_MAX_PREREQUISITES)
    }

    /// Whether any direct prerequisite is basic enough to start from.
    pub fn should_offer_start(&self, label: &str) -> bool {
        self.basic_node(label).is_some()
    }

    /// `start` followed by `prerequisites`, ordered by their own
    /// prerequisite count (stable for ties).
    ///
    /// This is a one-level heuristic, not a topological sort; see
    /// [`ordered_prerequisites`](Self::ordered_prerequisites) for that.
    pub fn learning_path(&self, start: &str, prerequisites: &[String]) -> Vec<String> {
        let mut rest: Vec<(usize, &String)> = prerequisites
            .iter()
            .filter(|p| p.as_str() != start)
            .map(|p| (self.prerequisite_count(p), p))
            .collect();
        rest.sort_by_key(|(count, _)| *count);

        std::iter::once(start.to_string())
            .chain(rest.into_iter().map(|(_, p)| p.clone()))
            .collect()
    }

    /// Answer a full navigation request for one knowledge point.
    pub fn plan(&self, label: &str) -> NavigationPlan {
        let prerequisites = self.prerequisites_for(label);
        let start = self.basic_node(label);
        let path = start
            .as_deref()
            .map(|s| self.learning_path(s, &prerequisites))
            .unwrap_or_default();

        debug!(
            knowledge = label,
            prerequisites = prerequisites.len(),
            offer_start = start.is_some(),
            "navigation planned"
        );

        NavigationPlan {
            target: label.to_string(),
            offer_start: start.is_some(),
            prerequisites,
            start,
            path,
        }
    }

    /// Every transitive prerequisite of `label` in dependency order,
    /// ending with `label` itself.
    ///
    /// Ties are broken by arena order, so the result is deterministic.
    pub fn ordered_prerequisites(&self, label: &str) -> Result<Vec<String>, NavigatorError> {
        let target = self
            .graph
            .index_of_label(label)
            .ok_or_else(|| NavigatorError::UnknownNode(label.to_string()))?;

        // Collect the ancestor set.
        let mut members = BTreeSet::from([target]);
        let mut stack = vec![target];
        while let Some(idx) = stack.pop() {
            for &p in self.graph.prerequisites_of(idx) {
                if members.insert(p) {
                    stack.push(p);
                }
            }
        }

        // Kahn's algorithm restricted to the ancestor set.
        let mut pending: HashMap<NodeIndex, usize> = members
            .iter()
            .map(|&idx| (idx, self.graph.prerequisites_of(idx).len()))
            .collect();
        let mut ready: BTreeSet<NodeIndex> = pending
            .iter()
            .filter(|&(_, &n)| n == 0)
            .map(|(&idx, _)| idx)
            .collect();

        let mut order = Vec::with_capacity(members.len());
        while let Some(idx) = ready.pop_first() {
            order.push(idx);
            for &dep in self.graph.dependents_of(idx) {
                if let Some(n) = pending.get_mut(&dep) {
                    *n -= 1;
                    if *n == 0 {
                        ready.insert(dep);
                    }
                }
            }
        }

        if order.len() < members.len() {
            let stuck = members
                .iter()
                .filter(|idx| !order.contains(idx))
                .filter_map(|&idx| self.label(idx))
                .map(str::to_string)
                .collect();
            return Err(NavigatorError::Cycle(stuck));
        }

        Ok(order
            .into_iter()
            .filter_map(|idx| self.label(idx))
            .map(str::to_string)
            .collect())
    }
}
