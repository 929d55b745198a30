//! Interactive render surface for a knowledge graph.
//!
//! The surface owns the graph for the lifetime of a view. It answers
//! hit-tests, applies drag gestures to single nodes, recentres and zooms
//! the layout, and renders everything to a [`Canvas`]. Animation state is
//! driven by the elapsed time the caller passes in.

use std::collections::HashSet;
use std::f64::consts::PI;
use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::config::SurfaceConfig;

use super::canvas::Canvas;
use super::models::{KnowledgeNode, Point};
use super::store::{KnowledgeGraph, NodeIndex};
use super::style::{
    edge_style, node_radius, status_color, LineDash, GLOW_COLOR, LABEL_COLOR,
    SELECTION_COLOR,
};

/// Length of the arrowhead strokes.
const ARROW_LENGTH: f64 = 10.0;
/// Half-angle of the arrowhead.
const ARROW_ANGLE: f64 = PI / 7.0;
/// Gap between a node and its glow ring at minimum intensity.
const GLOW_BASE_GAP: f64 = 4.0;
/// Extra glow ring growth at full intensity.
const GLOW_SPREAD: f64 = 6.0;
/// Vertical gap between a node and its label.
const LABEL_GAP: f64 = 12.0;

/// Geometry and animation parameters for a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSettings {
    pub width: f64,
    pub height: f64,
    pub hit_radius: f64,
    pub tap_slop: f64,
    pub node_radius_min: f64,
    pub node_radius_max: f64,
    pub zoom_threshold: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    pub pulse_period: Duration,
    pub entrance_duration: Duration,
}

impl From<&SurfaceConfig> for SurfaceSettings {
    fn from(config: &SurfaceConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            hit_radius: config.hit_radius,
            tap_slop: config.tap_slop,
            node_radius_min: config.node_radius_min,
            node_radius_max: config.node_radius_max,
            zoom_threshold: config.zoom_threshold,
            zoom_in_factor: config.zoom_in_factor,
            zoom_out_factor: config.zoom_out_factor,
            pulse_period: config.pulse_period(),
            entrance_duration: config.entrance_duration(),
        }
    }
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self::from(&SurfaceConfig::default())
    }
}

/// Which way the last zoom toggle went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Pointer input, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
}

/// An in-progress drag of one node.
#[derive(Debug, Clone, Copy)]
struct DragState {
    node: NodeIndex,
    last: Point,
    /// Total pointer path length since the drag started.
    travelled: f64,
}

type TapCallback = Box<dyn FnMut(NodeIndex, &KnowledgeNode)>;

/// Interactive view state over a [`KnowledgeGraph`].
pub struct GraphSurface {
    graph: KnowledgeGraph,
    settings: SurfaceSettings,
    drag: Option<DragState>,
    highlighted: HashSet<NodeIndex>,
    entrance_started: Option<Duration>,
    on_tap: Option<TapCallback>,
}

impl fmt::Debug for GraphSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphSurface")
            .field("nodes", &self.graph.len())
            .field("settings", &self.settings)
            .field("dragging", &self.drag.map(|d| d.node))
            .field("highlighted", &self.highlighted.len())
            .finish()
    }
}

impl GraphSurface {
    pub fn new(graph: KnowledgeGraph, settings: SurfaceSettings) -> Self {
        Self {
            graph,
            settings,
            drag: None,
            highlighted: HashSet::new(),
            entrance_started: None,
            on_tap: None,
        }
    }

    pub fn graph(&self) -> &KnowledgeGraph {
        &self.graph
    }

    /// Mutable graph access, for mastery updates from the host.
    pub fn graph_mut(&mut self) -> &mut KnowledgeGraph {
        &mut self.graph
    }

    pub fn into_graph(self) -> KnowledgeGraph {
        self.graph
    }

    pub fn settings(&self) -> &SurfaceSettings {
        &self.settings
    }

    /// Change the canvas size. Node positions are left as they are.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.settings.width = width;
        self.settings.height = height;
    }

    /// Centre of the canvas.
    pub fn center(&self) -> Point {
        Point::new(self.settings.width / 2.0, self.settings.height / 2.0)
    }

    /// Register the callback invoked when a node is tapped.
    pub fn set_on_tap<F>(&mut self, callback: F)
    where
        F: FnMut(NodeIndex, &KnowledgeNode) + 'static,
    {
        self.on_tap = Some(Box::new(callback));
    }

    /// Radius a node is drawn with once the entrance animation is done.
    pub fn radius_of(&self, idx: NodeIndex) -> Option<f64> {
        self.graph.node(idx).map(|n| {
            node_radius(
                n.mastery,
                self.settings.node_radius_min,
                self.settings.node_radius_max,
            )
        })
    }

    // =========================================================================
    // Hit-testing and gestures
    // =========================================================================

    /// The nearest node within the hit radius of `point`.
    ///
    /// Equal distances keep the node that comes first in arena order.
    pub fn hit_test(&self, point: Point) -> Option<NodeIndex> {
        let mut best: Option<(NodeIndex, f64)> = None;
        for (idx, node) in self.graph.iter() {
            let d = node.position.distance(point);
            if d > self.settings.hit_radius {
                continue;
            }
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((idx, d));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Node currently being dragged.
    pub fn dragging(&self) -> Option<NodeIndex> {
        self.drag.map(|d| d.node)
    }

    /// Start a drag on the node under `point`, if any.
    pub fn pointer_down(&mut self, point: Point) -> Option<NodeIndex> {
        self.drag = self.hit_test(point).map(|node| DragState {
            node,
            last: point,
            travelled: 0.0,
        });
        if let Some(drag) = self.drag {
            debug!(node = drag.node.index(), "drag started");
        }
        self.dragging()
    }

    /// Move the dragged node by the pointer delta since the previous event.
    ///
    /// Returns `false` when no drag is active.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let delta = point - drag.last;
        drag.last = point;
        drag.travelled += delta.length();
        let node = drag.node;
        self.graph.translate(node, delta.x, delta.y);
        true
    }

    /// End the current drag.
    ///
    /// If the pointer stayed within the tap slop the gesture counts as a
    /// tap: the tap callback fires and the node is returned.
    pub fn pointer_up(&mut self, point: Point) -> Option<NodeIndex> {
        let drag = self.drag.take()?;
        let travelled = drag.travelled + drag.last.distance(point);
        if travelled > self.settings.tap_slop {
            debug!(node = drag.node.index(), travelled, "drag finished");
            return None;
        }

        debug!(node = drag.node.index(), "node tapped");
        if let (Some(callback), Some(node)) = (self.on_tap.as_mut(), self.graph.node(drag.node)) {
            callback(drag.node, node);
        }
        Some(drag.node)
    }

    /// Dispatch a pointer event. Returns the node a `Down` selected or an
    /// `Up` tapped.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<NodeIndex> {
        match event {
            PointerEvent::Down(p) => self.pointer_down(p),
            PointerEvent::Move(p) => {
                self.pointer_move(p);
                None
            }
            PointerEvent::Up(p) => self.pointer_up(p),
        }
    }

    // =========================================================================
    // Layout operations
    // =========================================================================

    /// Translate every node so the mean position lands on the canvas centre.
    pub fn center_graph(&mut self) {
        let Some(centroid) = self.graph.centroid() else {
            return;
        };
        let offset = self.center() - centroid;
        self.graph.map_positions(|p| p + offset);
        debug!(dx = offset.x, dy = offset.y, "graph centred");
    }

    /// Mean distance of the nodes from the canvas centre.
    pub fn mean_distance_from_center(&self) -> Option<f64> {
        if self.graph.is_empty() {
            return None;
        }
        let center = self.center();
        let total: f64 = self
            .graph
            .nodes()
            .iter()
            .map(|n| n.position.distance(center))
            .sum();
        Some(total / self.graph.len() as f64)
    }

    /// Scale every position radially from the canvas centre.
    ///
    /// A compact layout (mean distance below the threshold) zooms in, a
    /// spread-out one zooms out.
    pub fn toggle_zoom(&mut self) -> ZoomDirection {
        let spread = self.mean_distance_from_center().unwrap_or(0.0);
        let (direction, factor) = if spread < self.settings.zoom_threshold {
            (ZoomDirection::In, self.settings.zoom_in_factor)
        } else {
            (ZoomDirection::Out, self.settings.zoom_out_factor)
        };

        let center = self.center();
        self.graph
            .map_positions(|p| center + (p - center).scale(factor));
        debug!(?direction, factor, spread, "zoom toggled");
        direction
    }

    // =========================================================================
    // Highlight and animation
    // =========================================================================

    /// Mark every node whose label is in `labels` for the glow pulse.
    ///
    /// Replaces the previous highlight set. Returns how many nodes matched.
    pub fn highlight<I, S>(&mut self, labels: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: HashSet<String> = labels.into_iter().map(|s| s.as_ref().to_string()).collect();
        self.highlighted = self
            .graph
            .iter()
            .filter(|(_, n)| wanted.contains(&n.label))
            .map(|(idx, _)| idx)
            .collect();
        self.highlighted.len()
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted.clear();
    }

    pub fn is_highlighted(&self, idx: NodeIndex) -> bool {
        self.highlighted.contains(&idx)
    }

    /// Glow intensity in `[0, 1]` at `elapsed`, a sinusoid over the pulse period.
    pub fn glow_intensity(&self, elapsed: Duration) -> f64 {
        let period = self.settings.pulse_period.as_secs_f64();
        if period <= 0.0 {
            return 1.0;
        }
        0.5 + 0.5 * (2.0 * PI * elapsed.as_secs_f64() / period).sin()
    }

    /// Begin the entrance animation at `at`.
    pub fn start_entrance(&mut self, at: Duration) {
        self.entrance_started = Some(at);
    }

    /// Eased entrance progress in `[0, 1]`; `1.0` when no animation runs.
    pub fn entrance_progress(&self, now: Duration) -> f64 {
        let Some(started) = self.entrance_started else {
            return 1.0;
        };
        let total = self.settings.entrance_duration.as_secs_f64();
        if total <= 0.0 {
            return 1.0;
        }
        let t = (now.saturating_sub(started).as_secs_f64() / total).clamp(0.0, 1.0);
        // ease-out cubic
        1.0 - (1.0 - t).powi(3)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Draw edges, glow rings, nodes, the selection ring and labels.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, elapsed: Duration) {
        let grow = self.entrance_progress(elapsed);
        let radius = |idx: NodeIndex| self.radius_of(idx).unwrap_or(0.0) * grow;

        for edge in self.graph.edges() {
            let (Some(from), Some(to)) = (self.graph.node(edge.from), self.graph.node(edge.to))
            else {
                continue;
            };
            let style = edge_style(edge.relation);
            let r_from = radius(edge.from);
            let r_to = radius(edge.to);

            let delta = to.position - from.position;
            let length = delta.length();
            if length <= r_from + r_to {
                continue;
            }
            let unit = delta.scale(1.0 / length);
            let start = from.position + unit.scale(r_from);
            let end = to.position - unit.scale(r_to);

            canvas.line(start, end, style.color, style.dash);
            if style.arrow {
                for (a, b) in arrowhead(end, unit) {
                    canvas.line(a, b, style.color, LineDash::Solid);
                }
            }
        }

        if !self.highlighted.is_empty() {
            let glow = self.glow_intensity(elapsed);
            for &idx in &self.highlighted {
                if let Some(node) = self.graph.node(idx) {
                    let r = radius(idx) + GLOW_BASE_GAP + GLOW_SPREAD * glow;
                    canvas.circle(node.position, r, GLOW_COLOR, false);
                }
            }
        }

        for (idx, node) in self.graph.iter() {
            canvas.circle(node.position, radius(idx), status_color(node.status), true);
        }

        if let Some(idx) = self.dragging() {
            if let Some(node) = self.graph.node(idx) {
                canvas.circle(node.position, radius(idx) + 2.0, SELECTION_COLOR, false);
            }
        }

        for (idx, node) in self.graph.iter() {
            let at = node.position + Point::new(0.0, radius(idx) + LABEL_GAP);
            canvas.text(at, &node.label, LABEL_COLOR);
        }
    }
}

/// The two strokes of an arrowhead whose tip is at `tip`, pointing along `unit`.
fn arrowhead(tip: Point, unit: Point) -> [(Point, Point); 2] {
    let back = Point::new(-unit.x, -unit.y);
    let rotate = |v: Point, angle: f64| {
        let (s, c) = angle.sin_cos();
        Point::new(v.x * c - v.y * s, v.x * s + v.y * c)
    };
    [
        (tip, tip + rotate(back, ARROW_ANGLE).scale(ARROW_LENGTH)),
        (tip, tip + rotate(back, -ARROW_ANGLE).scale(ARROW_LENGTH)),
    ]
}
