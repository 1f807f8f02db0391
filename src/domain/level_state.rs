//! Session-scoped reveal/activation flags

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::{Node, NodeId};

/// Monotone per-node flags accumulated over one session.
///
/// Both sets only grow. Navigating back never prunes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LevelState {
    activated: BTreeSet<NodeId>,
    revealed: BTreeSet<NodeId>,
}

impl LevelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a node confirmed. Returns true if it was not confirmed before.
    pub fn activate(&mut self, id: NodeId) -> bool {
        self.activated.insert(id)
    }

    /// Lift a node's hidden presentation. Returns true if it was hidden before.
    pub fn reveal(&mut self, id: NodeId) -> bool {
        self.revealed.insert(id)
    }

    pub fn is_activated(&self, id: NodeId) -> bool {
        self.activated.contains(&id)
    }

    pub fn is_revealed(&self, id: NodeId) -> bool {
        self.revealed.contains(&id)
    }

    /// `!initially_visible` and not revealed yet.
    pub fn is_effectively_hidden(&self, node: &Node) -> bool {
        !node.initially_visible && !self.is_revealed(node.id)
    }

    pub fn is_effectively_visible(&self, node: &Node) -> bool {
        !self.is_effectively_hidden(node)
    }

    /// Gated and not yet confirmed.
    pub fn is_pending_activation(&self, node: &Node) -> bool {
        node.requires_activation && !self.is_activated(node.id)
    }

    pub fn activated(&self) -> &BTreeSet<NodeId> {
        &self.activated
    }

    pub fn revealed(&self) -> &BTreeSet<NodeId> {
        &self.revealed
    }

    /// True if every flag set in `earlier` is still set here.
    pub fn includes(&self, earlier: &LevelState) -> bool {
        self.activated.is_superset(&earlier.activated) && self.revealed.is_superset(&earlier.revealed)
    }
}
