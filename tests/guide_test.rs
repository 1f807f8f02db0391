//! Tests for dataset loading and the Guide lifecycle

use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use leitfaden::application::{ApplicationError, Dataset, Guide, GuideState, LoadService};
use leitfaden::infrastructure::traits::{DataSource, FetchError, FileDataSource};
use leitfaden::util::testing;

const NODES: &str = r#"[
  {"id": 1, "question": "Intro", "is_visible": true, "is_active": false, "comment": null},
  {"id": 2, "question": "Start; Worum geht es?", "is_visible": true, "is_active": false, "comment": ""},
  {"id": 3, "question": "Ja es gibt Mängel", "is_visible": true, "is_active": true, "comment": "Bitte Fotos beilegen"},
  {"id": 4, "question": "--- Nein", "is_visible": false, "is_active": false, "comment": null}
]"#;

const EDGES: &str = r#"[
  {"start_id": 1, "target_id": 2},
  {"start_id": 2, "target_id": 3},
  {"start_id": 2, "target_id": 4},
  {"start_id": 2, "target_id": 77}
]"#;

/// In-memory collections; a missing name answers 404.
struct MemorySource(HashMap<String, String>);

impl MemorySource {
    fn new(collections: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self(
            collections
                .iter()
                .map(|(name, body)| (name.to_string(), body.to_string()))
                .collect(),
        ))
    }
}

impl DataSource for MemorySource {
    fn fetch(&self, name: &str) -> Result<String, FetchError> {
        self.0.get(name).cloned().ok_or_else(FetchError::not_found)
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}

fn loader(source: Arc<dyn DataSource>) -> LoadService {
    LoadService::new(source, "possibilities.json", "connections.json")
}

fn loaded(start_id: Option<i64>, source: Arc<dyn DataSource>) -> Guide {
    testing::init_test_setup();
    let mut guide = Guide::new(start_id);
    guide.load(&loader(source));
    guide
}

#[test]
fn given_dataset_files_when_loading_then_guide_is_ready_at_start_node() {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("possibilities.json"), NODES).unwrap();
    fs::write(temp.path().join("connections.json"), EDGES).unwrap();

    // Act
    let guide = loaded(Some(2), Arc::new(FileDataSource::new(temp.path())));

    // Assert
    let navigator = guide.navigator().expect("ready");
    assert_eq!(navigator.path(), &[2]);
    let node = navigator.graph().get(3).unwrap();
    assert!(node.requires_activation);
    assert_eq!(node.comment.as_deref(), Some("Bitte Fotos beilegen"));
    assert_eq!(navigator.graph().get(2).unwrap().comment, None);
}

#[rstest]
#[case(Some(2), 2)]
#[case(Some(99), 1)]
#[case(None, 1)]
fn given_start_id_when_loading_then_root_is_resolved(
    #[case] start_id: Option<i64>,
    #[case] expected: i64,
) {
    let source = MemorySource::new(&[("possibilities.json", NODES), ("connections.json", EDGES)]);

    let guide = loaded(start_id, source);

    assert_eq!(guide.navigator().unwrap().path(), &[expected]);
}

#[test]
fn given_missing_edge_collection_when_loading_then_error_names_collection() {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("possibilities.json"), NODES).unwrap();

    // Act
    let guide = loaded(Some(2), Arc::new(FileDataSource::new(temp.path())));

    // Assert
    match guide.state() {
        GuideState::Error(ApplicationError::Load { collection, status }) => {
            assert_eq!(collection, "connections.json");
            assert!(status.contains("404"), "status: {status}");
        }
        other => panic!("expected load error, got {}", other.name()),
    }
    assert!(matches!(
        guide.navigator(),
        Err(ApplicationError::NotReady { state: "error" })
    ));
}

#[test]
fn given_malformed_json_when_loading_then_parse_error() {
    let source = MemorySource::new(&[
        ("possibilities.json", "{not json"),
        ("connections.json", EDGES),
    ]);

    let guide = loaded(None, source);

    assert!(matches!(
        guide.state(),
        GuideState::Error(ApplicationError::Parse { collection, .. }) if collection == "possibilities.json"
    ));
}

#[test]
fn given_empty_node_collection_when_loading_then_guide_is_empty() {
    let source = MemorySource::new(&[("possibilities.json", "[]"), ("connections.json", "[]")]);

    let mut guide = loaded(Some(2), source);

    assert!(matches!(guide.state(), GuideState::Empty));
    assert!(!guide.is_ready());
    assert!(guide.navigator_mut().is_err());
}

#[test]
fn given_loaded_guide_when_loading_again_then_state_is_kept() {
    // Arrange
    let source = MemorySource::new(&[("possibilities.json", NODES), ("connections.json", EDGES)]);
    let mut guide = loaded(Some(2), source);
    guide.navigator_mut().unwrap().click(4);

    // Act: a broken second source must not replace the session
    let broken = MemorySource::new(&[]);
    guide.load(&loader(broken));

    // Assert
    let navigator = guide.navigator().unwrap();
    assert!(navigator.level_state().is_revealed(4));
}

#[test]
fn given_dangling_edge_when_snapshotting_then_it_is_reported() {
    let source = MemorySource::new(&[("possibilities.json", NODES), ("connections.json", EDGES)]);

    let snapshot = loaded(Some(2), source).debug_snapshot();

    assert_eq!(snapshot.state, "ready");
    assert_eq!(snapshot.nodes, 4);
    assert_eq!(snapshot.root, Some(2));
    assert_eq!(snapshot.roots, vec![1]);
    assert_eq!(snapshot.dangling_edges.len(), 1);
    assert_eq!(snapshot.dangling_edges[0].child, 77);
    assert_eq!(snapshot.adjacency.get(&2), Some(&vec![3, 4]));
    assert!(snapshot.error.is_none());
}

#[test]
fn given_fetched_dataset_when_installed_then_guide_is_ready_once() {
    // Arrange
    testing::init_test_setup();
    let source = MemorySource::new(&[("possibilities.json", NODES), ("connections.json", EDGES)]);
    let dataset = loader(source).fetch().expect("fetch");
    let mut guide = Guide::new(Some(2));

    // Act
    let state = guide.load_dataset(dataset.clone());

    // Assert
    assert!(matches!(state, GuideState::Ready(_)));
    assert_eq!(guide.navigator().unwrap().path(), &[2]);

    // Act: a second dataset is ignored
    let mut other = dataset;
    other.nodes.retain(|node| node.id != 2);
    guide.load_dataset(other);
    assert_eq!(guide.debug_snapshot().nodes, 4);
}

#[test]
fn given_empty_dataset_when_installed_then_guide_is_empty() {
    let mut guide = Guide::new(None);

    guide.load_dataset(Dataset::default());

    assert!(matches!(guide.state(), GuideState::Empty));
}
