//! Domain entities: nodes, edges and the raw records they are loaded from

use serde::{Deserialize, Serialize};

/// Identifier of a question/option node.
pub type NodeId = i64;

/// Node record as stored in the node collection (`possibilities.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub question: String,
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Edge record as stored in the edge collection (`connections.json`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub start_id: NodeId,
    pub target_id: NodeId,
}

/// One question or option in the decision graph.
///
/// Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: NodeId,
    /// Display text; may carry styling markers (see [`crate::domain::label`])
    pub label: String,
    /// User must confirm this node before navigating through it or its siblings
    pub requires_activation: bool,
    /// Shown unblurred without a reveal click
    pub initially_visible: bool,
    /// Text pushed to the comment channel on confirm/select
    pub comment: Option<String>,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            requires_activation: false,
            initially_visible: true,
            comment: None,
        }
    }

    pub fn gated(mut self) -> Self {
        self.requires_activation = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.initially_visible = false;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        // empty comments count as absent
        let comment = record.comment.filter(|c| !c.is_empty());
        Self {
            id: record.id,
            label: record.question,
            requires_activation: record.is_active,
            initially_visible: record.is_visible,
            comment,
        }
    }
}

/// Directed parent -> child relationship. Collection order defines child order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub parent: NodeId,
    pub child: NodeId,
}

impl Edge {
    pub fn new(parent: NodeId, child: NodeId) -> Self {
        Self { parent, child }
    }
}

impl From<EdgeRecord> for Edge {
    fn from(record: EdgeRecord) -> Self {
        Self::new(record.start_id, record.target_id)
    }
}
