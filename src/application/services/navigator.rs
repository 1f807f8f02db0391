//! Navigation controller
//!
//! Owns the path stack and the session's [`LevelState`], interprets clicks
//! against the reveal/activation gates and drives the comment channel.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    auto_reveal_candidate, order_siblings, DomainError, GraphStore, LevelState, Node, NodeId,
};

/// One option of the current level, as handed to the presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelItem<'a> {
    pub node: &'a Node,
    /// `initially_visible` or revealed
    pub effectively_visible: bool,
    pub is_activated: bool,
    /// Revealed by the auto-reveal rule on this level
    pub auto_revealed: bool,
    pub has_children: bool,
}

/// Why a click was refused. Expected control flow, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The clicked item itself still needs confirmation
    ActivateItem,
    /// Another gated item on this level is unconfirmed
    ActivateSiblings,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::ActivateItem => write!(f, "Please activate this item before going deeper."),
            Rejection::ActivateSiblings => {
                write!(f, "Please activate all items on this level before proceeding.")
            }
        }
    }
}

/// What a click did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Hidden item unblurred; nothing else happened
    Revealed,
    /// Path grew by the clicked item
    Descended(NodeId),
    /// Leaf selected; path unchanged
    LeafSelected,
    Rejected(Rejection),
    /// Target is not an option of the current level
    Ignored,
}

/// Outcome plus the comment pushed to the presentation, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickResult {
    pub outcome: ClickOutcome,
    pub comment: Option<String>,
}

impl ClickResult {
    fn new(outcome: ClickOutcome, comment: Option<String>) -> Self {
        Self { outcome, comment }
    }
}

/// Session state machine over `(path, revealed, activated, auto_revealed)`.
#[derive(Debug, Clone)]
pub struct Navigator {
    graph: Arc<GraphStore>,
    path: Vec<NodeId>,
    state: LevelState,
    /// Auto-reveal of the level currently displayed
    auto_revealed: Option<NodeId>,
    /// Auto-reveals per level (keyed by the level's parent) so re-entry restores the order
    auto_reveals: HashMap<NodeId, NodeId>,
    shown_comment: Option<String>,
}

impl Navigator {
    /// Start a session at `root` and evaluate its first level.
    pub fn new(graph: Arc<GraphStore>, root: NodeId) -> ApplicationResult<Self> {
        if graph.get(root).is_none() {
            return Err(ApplicationError::Domain(DomainError::UnknownNode(root)));
        }
        let mut navigator = Self {
            graph,
            path: vec![root],
            state: LevelState::new(),
            auto_revealed: None,
            auto_reveals: HashMap::new(),
            shown_comment: None,
        };
        navigator.enter_level();
        Ok(navigator)
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Node whose children form the current level.
    pub fn current(&self) -> NodeId {
        self.path[self.path.len() - 1]
    }

    /// Path resolved to nodes, root first.
    pub fn breadcrumb(&self) -> Vec<&Node> {
        self.path.iter().filter_map(|id| self.graph.get(*id)).collect()
    }

    pub fn level_state(&self) -> &LevelState {
        &self.state
    }

    pub fn auto_revealed(&self) -> Option<NodeId> {
        self.auto_revealed
    }

    pub fn shown_comment(&self) -> Option<&str> {
        self.shown_comment.as_deref()
    }

    /// Close the comment popup.
    pub fn dismiss_comment(&mut self) {
        self.shown_comment = None;
    }

    /// Ordered, annotated options of the current level.
    pub fn current_items(&self) -> Vec<LevelItem<'_>> {
        let siblings = self.graph.siblings_under(self.current());
        order_siblings(&siblings, &self.state, self.auto_revealed)
            .into_iter()
            .map(|node| LevelItem {
                node,
                effectively_visible: self.state.is_effectively_visible(node),
                is_activated: self.state.is_activated(node.id),
                auto_revealed: self.auto_revealed == Some(node.id),
                has_children: !self.graph.is_leaf(node.id),
            })
            .collect()
    }

    /// Interpret a click on an option of the current level.
    #[instrument(level = "debug", skip(self))]
    pub fn click(&mut self, id: NodeId) -> ClickResult {
        let graph = Arc::clone(&self.graph);
        let siblings = graph.siblings_under(self.current());
        let Some(item) = siblings.iter().copied().find(|node| node.id == id) else {
            warn!("click on {id} ignored: not an option of level {}", self.current());
            return ClickResult::new(ClickOutcome::Ignored, None);
        };

        if self.state.is_effectively_hidden(item) {
            self.state.reveal(id);
            debug!("revealed {id}");
            self.evaluate_auto_reveal(&siblings);
            return ClickResult::new(ClickOutcome::Revealed, None);
        }

        let mut comment = None;
        if !item.requires_activation {
            if let Some(text) = &item.comment {
                comment = Some(self.show_comment(text));
            }
        }

        if self.state.is_pending_activation(item) {
            debug!("click on {id} rejected: item not activated");
            return ClickResult::new(ClickOutcome::Rejected(Rejection::ActivateItem), comment);
        }
        let blocked = siblings
            .iter()
            .any(|sibling| sibling.id != id && self.state.is_pending_activation(sibling));
        if blocked {
            debug!("click on {id} rejected: gated siblings pending");
            return ClickResult::new(ClickOutcome::Rejected(Rejection::ActivateSiblings), comment);
        }

        let item_comment = item.comment.as_deref().filter(|text| !self.is_shown(text));
        if graph.is_leaf(id) {
            debug!("leaf {id} selected");
            if let Some(text) = item_comment {
                comment = Some(self.show_comment(text));
            }
            return ClickResult::new(ClickOutcome::LeafSelected, comment);
        }

        if item.requires_activation {
            if let Some(text) = item_comment {
                comment = Some(self.show_comment(text));
            }
        }
        self.path.push(id);
        debug!("descended to {id}, depth {}", self.path.len());
        self.enter_level();
        ClickResult::new(ClickOutcome::Descended(id), comment)
    }

    /// Confirm a node; returns the comment pushed to the presentation.
    #[instrument(level = "debug", skip(self, comment))]
    pub fn activate(&mut self, id: NodeId, comment: Option<&str>) -> Option<String> {
        if self.graph.get(id).is_none() {
            warn!("activate {id} ignored: unknown node");
            return None;
        }
        if self.state.activate(id) {
            debug!("activated {id}");
        }
        let graph = Arc::clone(&self.graph);
        self.evaluate_auto_reveal(&graph.siblings_under(self.current()));
        comment.map(|text| self.show_comment(text))
    }

    /// Pop one level. No-op at the root.
    #[instrument(level = "debug", skip(self))]
    pub fn back(&mut self) -> bool {
        if self.path.len() <= 1 {
            debug!("back at root ignored");
            return false;
        }
        self.path.pop();
        self.enter_level();
        true
    }

    fn enter_level(&mut self) {
        self.auto_revealed = self.auto_reveals.get(&self.current()).copied();
        let graph = Arc::clone(&self.graph);
        self.evaluate_auto_reveal(&graph.siblings_under(self.current()));
    }

    /// Apply the auto-reveal rule once per level.
    fn evaluate_auto_reveal(&mut self, siblings: &[&Node]) {
        if self.auto_revealed.is_some() {
            return;
        }
        if let Some(candidate) = auto_reveal_candidate(siblings, &self.state) {
            self.state.reveal(candidate);
            self.auto_revealed = Some(candidate);
            self.auto_reveals.insert(self.current(), candidate);
            debug!("auto-revealed {candidate} on level {}", self.current());
        }
    }

    fn is_shown(&self, text: &str) -> bool {
        self.shown_comment.as_deref() == Some(text)
    }

    fn show_comment(&mut self, text: &str) -> String {
        self.shown_comment = Some(text.to_string());
        text.to_string()
    }
}
