use learnmap_core::graph::{KnowledgeEdge, KnowledgeGraph, KnowledgeNode, Point, RelationKind};

fn sample() -> KnowledgeGraph {
    KnowledgeGraph::new(
        vec![
            KnowledgeNode::new("a", "加法", Point::new(0.0, 0.0)),
            KnowledgeNode::new("b", "乘法", Point::new(10.0, 0.0)),
            KnowledgeNode::new("a", "重复", Point::new(99.0, 99.0)),
            KnowledgeNode::new("c", "乘法", Point::new(20.0, 0.0)),
        ],
        vec![
            KnowledgeEdge::prerequisite("a", "b"),
            KnowledgeEdge::prerequisite("a", "b"),
            KnowledgeEdge::new("b", "c", RelationKind::Application),
            KnowledgeEdge::prerequisite("b", "nowhere"),
        ],
    )
}

#[test]
fn test_duplicate_ids_keep_first() {
    let graph = sample();
    assert_eq!(graph.len(), 3);
    let a = graph.node(graph.index_of("a").unwrap()).unwrap();
    assert_eq!(a.label, "加法");
}

#[test]
fn test_edges_resolved_and_deduplicated() {
    let graph = sample();
    assert_eq!(graph.edges().len(), 2);

    let a = graph.index_of("a").unwrap();
    let b = graph.index_of("b").unwrap();
    assert_eq!(graph.prerequisites_of(b), &[a]);
    assert_eq!(graph.dependents_of(a), &[b]);
    // Application edges are not prerequisites.
    assert!(graph.prerequisites_of(graph.index_of("c").unwrap()).is_empty());
}

#[test]
fn test_label_lookup_returns_first_match() {
    let graph = sample();
    assert_eq!(graph.index_of_label("乘法"), graph.index_of("b"));
    assert_eq!(graph.index_of_label("除法"), None);
}

#[test]
fn test_position_updates_by_index() {
    let mut graph = sample();
    let b = graph.index_of("b").unwrap();

    graph.translate(b, 5.0, -2.0);
    assert_eq!(graph.node(b).unwrap().position, Point::new(15.0, -2.0));

    graph.set_position(b, Point::new(1.0, 1.0));
    assert_eq!(graph.node(b).unwrap().position, Point::new(1.0, 1.0));
    assert_eq!(graph.nodes()[0].position, Point::new(0.0, 0.0));
}

#[test]
fn test_mastery_updates() {
    let mut graph = sample();

    assert!(graph.set_mastery("a", 0.4));
    assert!(graph.set_mastery("b", 1.7));
    assert!(!graph.set_mastery("zzz", 0.5));

    assert_eq!(graph.nodes()[0].mastery, 0.4);
    assert_eq!(graph.nodes()[1].mastery, 1.0);

    let applied = graph.apply_mastery([("c", 0.3), ("missing", 0.9)]);
    assert_eq!(applied, 1);
    assert_eq!(graph.nodes()[2].mastery, 0.3);
}

#[test]
fn test_centroid() {
    let graph = sample();
    assert_eq!(graph.centroid(), Some(Point::new(10.0, 0.0)));
    assert_eq!(KnowledgeGraph::default().centroid(), None);
}
