use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use learnmap_core::graph::{
    node_radius, DisplayList, DrawCommand, GraphSurface, KnowledgeEdge, KnowledgeGraph,
    KnowledgeNode, LineDash, Point, PointerEvent, RelationKind, SurfaceSettings, ZoomDirection,
    GLOW_COLOR,
};

const EPS: f64 = 1e-9;

fn node(id: &str, x: f64, y: f64) -> KnowledgeNode {
    KnowledgeNode::new(id, id.to_uppercase(), Point::new(x, y))
}

fn surface_with(nodes: Vec<KnowledgeNode>, edges: Vec<KnowledgeEdge>) -> GraphSurface {
    GraphSurface::new(KnowledgeGraph::new(nodes, edges), SurfaceSettings::default())
}

fn two_node_surface() -> GraphSurface {
    surface_with(vec![node("a", 100.0, 100.0), node("b", 300.0, 300.0)], vec![])
}

fn position(surface: &GraphSurface, id: &str) -> Point {
    let graph = surface.graph();
    graph.node(graph.index_of(id).unwrap()).unwrap().position
}

#[test]
fn test_radius_increases_with_mastery() {
    let settings = SurfaceSettings::default();
    let mut previous = f64::NEG_INFINITY;
    for step in 0..=20 {
        let r = node_radius(
            step as f32 / 20.0,
            settings.node_radius_min,
            settings.node_radius_max,
        );
        assert!(r > previous, "radius must grow with mastery");
        previous = r;
    }
}

#[test]
fn test_rendered_radius_follows_mastery() {
    let surface = surface_with(
        vec![
            node("low", 100.0, 100.0).with_mastery(0.1),
            node("mid", 300.0, 100.0).with_mastery(0.5),
            node("high", 500.0, 100.0).with_mastery(0.9),
        ],
        vec![],
    );

    let mut canvas = DisplayList::new();
    surface.render(&mut canvas, Duration::ZERO);

    let radii: Vec<f64> = canvas.filled_circles().map(|(_, r, _)| r).collect();
    assert_eq!(radii.len(), 3);
    assert!(radii[0] < radii[1] && radii[1] < radii[2]);
}

#[test]
fn test_center_graph_moves_mean_to_canvas_center() {
    let mut surface = surface_with(
        vec![
            node("a", 10.0, 20.0),
            node("b", 300.0, 50.0),
            node("c", 120.0, 400.0),
            node("d", -40.0, 75.5),
        ],
        vec![],
    );

    surface.center_graph();

    let centroid = surface.graph().centroid().unwrap();
    let center = surface.center();
    assert!((centroid.x - center.x).abs() < EPS);
    assert!((centroid.y - center.y).abs() < EPS);
}

#[test]
fn test_center_graph_keeps_relative_layout() {
    let mut surface = two_node_surface();
    let before = position(&surface, "b") - position(&surface, "a");

    surface.center_graph();

    let after = position(&surface, "b") - position(&surface, "a");
    assert!((before.x - after.x).abs() < EPS);
    assert!((before.y - after.y).abs() < EPS);
}

#[test]
fn test_resize_moves_center_not_nodes() {
    let mut surface = two_node_surface();

    surface.resize(400.0, 200.0);

    assert_eq!(surface.center(), Point::new(200.0, 100.0));
    assert_eq!(position(&surface, "a"), Point::new(100.0, 100.0));
}

#[test]
fn test_center_empty_graph_is_noop() {
    let mut surface = surface_with(vec![], vec![]);
    surface.center_graph();
    assert!(surface.graph().is_empty());
}

#[test]
fn test_hit_test_at_node_center() {
    let surface = two_node_surface();
    let a = surface.graph().index_of("a").unwrap();
    let b = surface.graph().index_of("b").unwrap();

    assert_eq!(surface.hit_test(Point::new(100.0, 100.0)), Some(a));
    assert_eq!(surface.hit_test(Point::new(300.0, 300.0)), Some(b));
}

#[test]
fn test_hit_test_radius() {
    let surface = two_node_surface();
    let radius = surface.settings().hit_radius;

    assert!(surface.hit_test(Point::new(100.0 + radius, 100.0)).is_some());
    assert!(surface.hit_test(Point::new(100.0 + radius + 1.0, 100.0)).is_none());
    assert!(surface.hit_test(Point::new(700.0, 20.0)).is_none());
}

#[test]
fn test_hit_test_prefers_nearest_then_first() {
    let surface = surface_with(
        vec![node("a", 100.0, 100.0), node("b", 120.0, 100.0)],
        vec![],
    );
    let a = surface.graph().index_of("a").unwrap();
    let b = surface.graph().index_of("b").unwrap();

    assert_eq!(surface.hit_test(Point::new(118.0, 100.0)), Some(b));
    assert_eq!(surface.hit_test(Point::new(102.0, 100.0)), Some(a));
    // Equidistant: first in arena order wins.
    assert_eq!(surface.hit_test(Point::new(110.0, 100.0)), Some(a));
}

#[test]
fn test_drag_moves_only_selected_node() {
    let mut surface = two_node_surface();
    let b_before = position(&surface, "b");

    let selected = surface.pointer_down(Point::new(105.0, 95.0));
    assert_eq!(selected, surface.graph().index_of("a"));

    assert!(surface.pointer_move(Point::new(135.0, 75.0)));
    assert!(surface.pointer_move(Point::new(145.0, 85.0)));

    // Total pointer delta is (40, -10).
    assert_eq!(position(&surface, "a"), Point::new(140.0, 90.0));
    assert_eq!(position(&surface, "b"), b_before);

    // A long drag is not a tap.
    assert_eq!(surface.pointer_up(Point::new(145.0, 85.0)), None);
    assert_eq!(surface.dragging(), None);
}

#[test]
fn test_move_without_selection_changes_nothing() {
    let mut surface = two_node_surface();

    assert_eq!(surface.pointer_down(Point::new(600.0, 50.0)), None);
    assert!(!surface.pointer_move(Point::new(620.0, 70.0)));
    assert_eq!(position(&surface, "a"), Point::new(100.0, 100.0));
    assert_eq!(position(&surface, "b"), Point::new(300.0, 300.0));
}

#[test]
fn test_tap_slop_boundary() {
    let slop = SurfaceSettings::default().tap_slop;
    let mut surface = two_node_surface();
    let taps = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&taps);
    surface.set_on_tap(move |_, _| *sink.borrow_mut() += 1);

    // Travel of exactly the slop is still a tap.
    surface.pointer_down(Point::new(100.0, 100.0));
    surface.pointer_move(Point::new(100.0 + slop, 100.0));
    let tapped = surface.pointer_up(Point::new(100.0 + slop, 100.0));
    assert_eq!(tapped, surface.graph().index_of("a"));
    assert_eq!(*taps.borrow(), 1);

    // Just beyond it is a drag.
    let start = position(&surface, "a");
    surface.pointer_down(start);
    surface.pointer_move(start + Point::new(slop + 0.5, 0.0));
    let tapped = surface.pointer_up(start + Point::new(slop + 0.5, 0.0));
    assert_eq!(tapped, None);
    assert_eq!(*taps.borrow(), 1);
}

#[test]
fn test_tap_counts_travel_back_and_forth() {
    let slop = SurfaceSettings::default().tap_slop;
    let mut surface = two_node_surface();

    // Net displacement is zero but the path is longer than the slop.
    surface.pointer_down(Point::new(100.0, 100.0));
    surface.pointer_move(Point::new(100.0 + slop, 100.0));
    surface.pointer_move(Point::new(100.0, 100.0));
    assert_eq!(surface.pointer_up(Point::new(100.0, 100.0)), None);
}

#[test]
fn test_tap_invokes_callback() {
    let mut surface = two_node_surface();
    let tapped = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&tapped);
    surface.set_on_tap(move |_, node| sink.borrow_mut().push(node.id.clone()));

    surface.handle_pointer(PointerEvent::Down(Point::new(300.0, 300.0)));
    surface.handle_pointer(PointerEvent::Move(Point::new(302.0, 301.0)));
    let result = surface.handle_pointer(PointerEvent::Up(Point::new(302.0, 301.0)));

    assert_eq!(result, surface.graph().index_of("b"));
    assert_eq!(*tapped.borrow(), vec!["b".to_string()]);
}

#[test]
fn test_zoom_toggle_direction() {
    // Compact layout around the centre zooms in.
    let mut surface = surface_with(
        vec![node("a", 350.0, 300.0), node("b", 450.0, 300.0)],
        vec![],
    );
    assert_eq!(surface.toggle_zoom(), ZoomDirection::In);
    let factor = surface.settings().zoom_in_factor;
    assert!((position(&surface, "a").x - (400.0 - 50.0 * factor)).abs() < EPS);
    assert!((position(&surface, "b").x - (400.0 + 50.0 * factor)).abs() < EPS);
    assert!((position(&surface, "a").y - 300.0).abs() < EPS);

    // Spread-out layout zooms out.
    let mut surface = surface_with(
        vec![node("a", 0.0, 300.0), node("b", 800.0, 300.0)],
        vec![],
    );
    let before = surface.mean_distance_from_center().unwrap();
    assert_eq!(surface.toggle_zoom(), ZoomDirection::Out);
    let after = surface.mean_distance_from_center().unwrap();
    assert!(after < before);
}

#[test]
fn test_highlight_marks_labels() {
    let mut surface = two_node_surface();
    let a = surface.graph().index_of("a").unwrap();
    let b = surface.graph().index_of("b").unwrap();

    assert_eq!(surface.highlight(["A", "missing"]), 1);
    assert!(surface.is_highlighted(a));
    assert!(!surface.is_highlighted(b));

    let mut canvas = DisplayList::new();
    surface.render(&mut canvas, Duration::ZERO);
    assert_eq!(canvas.rings().filter(|(_, _, c)| *c == GLOW_COLOR).count(), 1);

    surface.clear_highlight();
    assert!(!surface.is_highlighted(a));
}

#[test]
fn test_highlight_leaves_positions_and_drag_alone() {
    let mut surface = two_node_surface();
    surface.pointer_down(Point::new(100.0, 100.0));
    let dragging = surface.dragging();

    surface.highlight(["B"]);

    assert_eq!(surface.dragging(), dragging);
    assert_eq!(position(&surface, "b"), Point::new(300.0, 300.0));
}

#[test]
fn test_glow_pulse() {
    let surface = two_node_surface();
    let period = surface.settings().pulse_period;

    assert!((surface.glow_intensity(Duration::ZERO) - 0.5).abs() < 1e-6);
    assert!((surface.glow_intensity(period / 4) - 1.0).abs() < 1e-6);
    assert!(surface.glow_intensity(period * 3 / 4).abs() < 1e-6);
}

#[test]
fn test_entrance_progress() {
    let mut surface = two_node_surface();
    assert_eq!(surface.entrance_progress(Duration::ZERO), 1.0);

    let start = Duration::from_millis(100);
    let total = surface.settings().entrance_duration;
    surface.start_entrance(start);

    assert_eq!(surface.entrance_progress(start), 0.0);
    let halfway = surface.entrance_progress(start + total / 2);
    assert!(halfway > 0.5 && halfway < 1.0);
    assert_eq!(surface.entrance_progress(start + total), 1.0);
    assert_eq!(surface.entrance_progress(start + total * 2), 1.0);
}

#[test]
fn test_render_edges_by_relation() {
    let surface = surface_with(
        vec![
            node("a", 100.0, 100.0),
            node("b", 400.0, 100.0),
            node("c", 100.0, 400.0),
        ],
        vec![
            KnowledgeEdge::prerequisite("a", "b"),
            KnowledgeEdge::new("a", "c", RelationKind::Related),
            KnowledgeEdge::prerequisite("a", "ghost"),
        ],
    );

    let mut canvas = DisplayList::new();
    surface.render(&mut canvas, Duration::ZERO);

    let lines: Vec<&DrawCommand> = canvas.lines().collect();
    // Prerequisite: shaft plus two arrowhead strokes; related: one dashed line.
    assert_eq!(lines.len(), 4);
    let dashed = lines
        .iter()
        .filter(|c| matches!(c, DrawCommand::Line { dash: LineDash::Dashed, .. }))
        .count();
    assert_eq!(dashed, 1);

    // Edges stop at the node rims.
    if let DrawCommand::Line { from, to, .. } = lines[0] {
        let r = surface.radius_of(surface.graph().index_of("a").unwrap()).unwrap();
        assert!((from.x - (100.0 + r)).abs() < EPS);
        assert!(to.x < 400.0);
    } else {
        panic!("expected a line");
    }

    assert_eq!(canvas.texts().collect::<Vec<_>>(), vec!["A", "B", "C"]);
}

#[test]
fn test_render_draws_selection_ring() {
    let mut surface = two_node_surface();
    surface.pointer_down(Point::new(100.0, 100.0));

    let mut canvas = DisplayList::new();
    surface.render(&mut canvas, Duration::ZERO);

    assert_eq!(canvas.rings().count(), 1);
}
