//! Graph store: immutable node table plus ordered adjacency.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::{Edge, Node, NodeId};

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, DomainError>;

/// Node table and parent -> ordered children table, built once.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    nodes: HashMap<NodeId, Node>,
    /// Node ids in collection order
    order: Vec<NodeId>,
    children: HashMap<NodeId, Vec<NodeId>>,
    /// Every edge target, including unresolved ones
    targets: HashSet<NodeId>,
    dangling: Vec<Edge>,
}

impl GraphStore {
    /// Build the store from the two flat collections.
    ///
    /// Tolerant: an edge from an unknown parent creates an (initially empty)
    /// children entry for it, an edge to an unknown target is kept in
    /// [`GraphStore::dangling_edges`] and contributes no child. Duplicate
    /// node ids keep their first position; the later record wins.
    #[instrument(level = "debug", skip_all, fields(nodes = nodes.len(), edges = edges.len()))]
    pub fn build(nodes: Vec<Node>, edges: &[Edge]) -> Self {
        let mut store = Self::default();

        for node in nodes {
            let id = node.id;
            if store.nodes.insert(id, node).is_some() {
                warn!("duplicate node id {id}: later record replaces earlier one");
            } else {
                store.order.push(id);
            }
            store.children.entry(id).or_default();
        }

        for edge in edges {
            store.targets.insert(edge.child);
            let known_parent = store.nodes.contains_key(&edge.parent);
            let siblings = store.children.entry(edge.parent).or_default();
            if !known_parent {
                warn!(
                    "edge from unknown node {}: keeping an empty children entry",
                    edge.parent
                );
            }
            if !store.nodes.contains_key(&edge.child) {
                warn!(
                    "edge {} -> {}: target does not exist, skipped",
                    edge.parent, edge.child
                );
                store.dangling.push(*edge);
                continue;
            }
            if siblings.contains(&edge.child) {
                warn!("duplicate edge {} -> {} ignored", edge.parent, edge.child);
                continue;
            }
            siblings.push(edge.child);
        }

        debug!(
            "graph built: {} nodes, {} adjacency entries, {} dangling edges",
            store.order.len(),
            store.children.len(),
            store.dangling.len()
        );
        store
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Ordered child ids; empty if the node has none or is unknown.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolved child nodes in edge order.
    pub fn siblings_under(&self, id: NodeId) -> Vec<&Node> {
        self.children_of(id)
            .iter()
            .filter_map(|child| self.nodes.get(child))
            .collect()
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.children_of(id).is_empty()
    }

    pub fn contains_edge(&self, parent: NodeId, child: NodeId) -> bool {
        self.children_of(parent).contains(&child)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Nodes in collection order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Full parent -> children table, sorted by parent id.
    pub fn adjacency(&self) -> BTreeMap<NodeId, Vec<NodeId>> {
        self.children
            .iter()
            .map(|(parent, children)| (*parent, children.clone()))
            .collect()
    }

    /// Edges whose target did not resolve to a known node.
    pub fn dangling_edges(&self) -> &[Edge] {
        &self.dangling
    }

    /// Nodes that are no edge's target, in collection order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.order
            .iter()
            .copied()
            .filter(|id| !self.targets.contains(id))
            .collect()
    }

    /// Pick the start node.
    ///
    /// Precedence: configured start id if present in the table, then the first
    /// node that is no edge's target, then the first node of the collection.
    pub fn resolve_root(&self, start_id: Option<NodeId>) -> GraphResult<NodeId> {
        if self.is_empty() {
            return Err(DomainError::EmptyDataset);
        }
        if let Some(start) = start_id {
            if self.nodes.contains_key(&start) {
                return Ok(start);
            }
            warn!("start node {start} not found, falling back to root detection");
        }
        if let Some(root) = self.roots().first() {
            return Ok(*root);
        }
        self.order.first().copied().ok_or(DomainError::NoRoot)
    }
}
