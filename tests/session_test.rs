//! End-to-end session tests: container wiring plus the interactive loop

use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::{Arc, Mutex};

use leitfaden::cli::output;
use leitfaden::cli::session::{apply_input, run_session, SessionInput};
use leitfaden::config::Settings;
use leitfaden::infrastructure::di::ServiceContainer;
use leitfaden::infrastructure::traits::{DataSource, FetchError, Prompter};
use leitfaden::util::testing;

const NODES: &str = r#"[
  {"id": 2, "question": "Was ist passiert?", "is_visible": true, "is_active": false},
  {"id": 3, "question": "Wasserschaden", "is_visible": true, "is_active": true, "comment": "Haupthahn schließen"},
  {"id": 4, "question": "/// Sonstiges", "is_visible": false, "is_active": false, "comment": "Hausverwaltung anrufen"},
  {"id": 5, "question": "Ja es tropft noch", "is_visible": true, "is_active": false, "comment": "Eimer unterstellen"}
]"#;

const EDGES: &str = r#"[
  {"start_id": 2, "target_id": 3},
  {"start_id": 2, "target_id": 4},
  {"start_id": 3, "target_id": 5}
]"#;

struct FixedSource;

impl DataSource for FixedSource {
    fn fetch(&self, name: &str) -> Result<String, FetchError> {
        let collections = HashMap::from([
            ("possibilities.json", NODES),
            ("connections.json", EDGES),
        ]);
        collections
            .get(name)
            .map(|body| body.to_string())
            .ok_or_else(FetchError::not_found)
    }

    fn describe(&self) -> String {
        "fixed".into()
    }
}

/// Replays canned lines, then reports end of input.
struct ScriptedPrompter(Mutex<VecDeque<String>>);

impl ScriptedPrompter {
    fn new(lines: &[&str]) -> Arc<Self> {
        Arc::new(Self(Mutex::new(
            lines.iter().map(|line| line.to_string()).collect(),
        )))
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&self, _prompt: &str) -> io::Result<Option<String>> {
        Ok(self.0.lock().unwrap().pop_front())
    }
}

fn container(lines: &[&str]) -> ServiceContainer {
    testing::init_test_setup();
    output::disable_colors();
    ServiceContainer::with_deps(
        Settings::default(),
        Arc::new(FixedSource),
        ScriptedPrompter::new(lines),
    )
}

#[test]
fn given_scripted_input_when_running_session_then_walks_to_leaf() {
    // Arrange: level 2 lists [hidden 4, gated 3] until 3 is confirmed
    let container = container(&["2", "a 2", "1", "1", "c", "b", "q"]);
    let mut guide = container.load_guide();
    let navigator = guide.navigator_mut().expect("ready");
    assert_eq!(navigator.path(), &[2]);

    // Act
    run_session(navigator, container.prompter.as_ref()).unwrap();

    // Assert
    assert!(navigator.level_state().is_activated(3));
    assert!(navigator.level_state().is_revealed(4));
    assert_eq!(navigator.auto_revealed(), Some(4));
    assert_eq!(navigator.path(), &[2]);
    assert_eq!(navigator.shown_comment(), None);
}

#[test]
fn given_end_of_input_when_running_session_then_returns_ok() {
    let container = container(&["", "nonsense", "7"]);
    let mut guide = container.load_guide();
    let navigator = guide.navigator_mut().unwrap();

    run_session(navigator, container.prompter.as_ref()).unwrap();

    assert_eq!(navigator.path(), &[2]);
    assert!(navigator.level_state().activated().is_empty());
}

#[test]
fn given_leaf_with_comment_when_clicked_then_comment_is_shown() {
    // Arrange
    let container = container(&[]);
    let mut guide = container.load_guide();
    let navigator = guide.navigator_mut().unwrap();
    assert!(apply_input(navigator, SessionInput::Activate(2)));
    assert!(apply_input(navigator, SessionInput::Click(1)));
    assert_eq!(navigator.path(), &[2, 3]);

    // Act
    assert!(apply_input(navigator, SessionInput::Click(1)));

    // Assert
    assert_eq!(navigator.path(), &[2, 3]);
    assert_eq!(navigator.shown_comment(), Some("Eimer unterstellen"));
    assert!(!apply_input(navigator, SessionInput::Quit));
}

#[test]
fn given_hidden_option_when_confirmed_then_refused_without_comment() {
    // Arrange: position 1 is the still hidden node 4
    let container = container(&[]);
    let mut guide = container.load_guide();
    let navigator = guide.navigator_mut().unwrap();
    assert!(!navigator.current_items()[0].effectively_visible);

    // Act
    assert!(apply_input(navigator, SessionInput::Activate(1)));

    // Assert
    assert!(navigator.level_state().activated().is_empty());
    assert!(!navigator.level_state().is_revealed(4));
    assert_eq!(navigator.shown_comment(), None);
}

#[test]
fn given_option_without_gate_when_confirmed_then_refused() {
    // Arrange: descend to the level holding the free leaf 5
    let container = container(&[]);
    let mut guide = container.load_guide();
    let navigator = guide.navigator_mut().unwrap();
    apply_input(navigator, SessionInput::Activate(2));
    apply_input(navigator, SessionInput::Click(1));
    assert_eq!(navigator.path(), &[2, 3]);
    navigator.dismiss_comment();

    // Act
    assert!(apply_input(navigator, SessionInput::Activate(1)));

    // Assert
    assert!(!navigator.level_state().is_activated(5));
    assert_eq!(navigator.shown_comment(), None);
}
