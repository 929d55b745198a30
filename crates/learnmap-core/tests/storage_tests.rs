use learnmap_core::graph::{KnowledgeGraph, KnowledgeNode, Point};
use learnmap_core::{FileMasteryStore, MasteryStore, Stage, StorageConfig, StorageError};
use tempfile::TempDir;

fn create_test_store() -> (FileMasteryStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = StorageConfig {
        data_dir: temp_dir.path().join("data").to_string_lossy().to_string(),
        ..StorageConfig::default()
    };
    (FileMasteryStore::new(&config), temp_dir)
}

#[test]
fn test_empty_store() {
    let (store, _temp) = create_test_store();
    assert!(store.load_all().unwrap().is_empty());
    assert!(store.get(Stage::Junior, "rational").unwrap().is_none());
}

#[test]
fn test_record_and_get() {
    let (store, _temp) = create_test_store();

    store.record(Stage::Junior, "rational", 0.75).unwrap();

    let record = store.get(Stage::Junior, "rational").unwrap().unwrap();
    assert_eq!(record.node_id, "rational");
    assert_eq!(record.level, 0.75);
    assert!(store.path().exists());

    // Same id in another stage is a different record.
    assert!(store.get(Stage::Senior, "rational").unwrap().is_none());
}

#[test]
fn test_record_replaces_and_clamps() {
    let (store, _temp) = create_test_store();

    store.record(Stage::Primary, "numbers", 0.2).unwrap();
    let record = store.record(Stage::Primary, "numbers", 7.0).unwrap();

    assert_eq!(record.level, 1.0);
    assert_eq!(store.load_all().unwrap().len(), 1);
}

#[test]
fn test_record_rejects_nan() {
    let (store, _temp) = create_test_store();

    let result = store.record(Stage::Primary, "numbers", f32::NAN);

    assert!(matches!(result, Err(StorageError::InvalidLevel { .. })));
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn test_remove() {
    let (store, _temp) = create_test_store();
    store.record(Stage::Senior, "sets", 0.5).unwrap();

    assert!(store.remove(Stage::Senior, "sets").unwrap());
    assert!(!store.remove(Stage::Senior, "sets").unwrap());
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn test_apply_to_graph() {
    let (store, _temp) = create_test_store();
    store.record(Stage::Junior, "a", 0.9).unwrap();
    store.record(Stage::Junior, "ghost", 0.4).unwrap();
    store.record(Stage::Senior, "b", 0.3).unwrap();

    let mut graph = KnowledgeGraph::new(
        vec![
            KnowledgeNode::new("a", "A", Point::default()),
            KnowledgeNode::new("b", "B", Point::default()),
        ],
        vec![],
    );

    let applied = store.apply_to(Stage::Junior, &mut graph).unwrap();

    assert_eq!(applied, 1);
    assert_eq!(graph.nodes()[0].mastery, 0.9);
    assert_eq!(graph.nodes()[1].mastery, 0.0);
}

#[test]
fn test_corrupt_file() {
    let (store, _temp) = create_test_store();
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "{ not json").unwrap();

    assert!(matches!(store.load_all(), Err(StorageError::Json(_))));
}
