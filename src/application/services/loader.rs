//! Dataset loading service
//!
//! Fetches the node and edge collections concurrently and parses them.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Edge, EdgeRecord, Node, NodeRecord};
use crate::infrastructure::traits::DataSource;

/// The two raw collections, as fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl Dataset {
    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (
            self.nodes.into_iter().map(Node::from).collect(),
            self.edges.into_iter().map(Edge::from).collect(),
        )
    }
}

/// Service fetching a [`Dataset`] from a [`DataSource`].
pub struct LoadService {
    source: Arc<dyn DataSource>,
    nodes_file: String,
    edges_file: String,
}

impl LoadService {
    pub fn new(
        source: Arc<dyn DataSource>,
        nodes_file: impl Into<String>,
        edges_file: impl Into<String>,
    ) -> Self {
        Self {
            source,
            nodes_file: nodes_file.into(),
            edges_file: edges_file.into(),
        }
    }

    /// Fetch both collections in parallel and join them.
    ///
    /// A failure of either collection fails the whole load; the node
    /// collection's error is reported if both fail.
    #[instrument(level = "debug", skip(self), fields(source = %self.source.describe()))]
    pub fn fetch(&self) -> ApplicationResult<Dataset> {
        let (nodes, edges) = rayon::join(
            || self.fetch_collection::<NodeRecord>(&self.nodes_file),
            || self.fetch_collection::<EdgeRecord>(&self.edges_file),
        );
        let dataset = Dataset {
            nodes: nodes?,
            edges: edges?,
        };
        debug!(
            "fetched {} nodes, {} edges",
            dataset.nodes.len(),
            dataset.edges.len()
        );
        Ok(dataset)
    }

    fn fetch_collection<T: DeserializeOwned>(&self, name: &str) -> ApplicationResult<Vec<T>> {
        let body = self
            .source
            .fetch(name)
            .map_err(|e| ApplicationError::Load {
                collection: name.to_string(),
                status: e.to_string(),
            })?;
        serde_json::from_str(&body).map_err(|e| ApplicationError::Parse {
            collection: name.to_string(),
            message: e.to_string(),
        })
    }
}
