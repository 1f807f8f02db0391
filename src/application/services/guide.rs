//! Session lifecycle: Loading -> Ready | Empty | Error

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::application::services::loader::{Dataset, LoadService};
use crate::application::services::navigator::Navigator;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainError, Edge, GraphStore, NodeId};

/// Lifecycle state of one guide session.
#[derive(Debug)]
pub enum GuideState {
    Loading,
    /// Data loaded but unusable (no nodes)
    Empty,
    /// Fetch or parse failed
    Error(ApplicationError),
    Ready(Navigator),
}

impl GuideState {
    pub fn name(&self) -> &'static str {
        match self {
            GuideState::Loading => "loading",
            GuideState::Empty => "empty",
            GuideState::Error(_) => "error",
            GuideState::Ready(_) => "ready",
        }
    }
}

/// Diagnostic dump of a session's data.
#[derive(Debug, Clone, Serialize)]
pub struct DebugSnapshot {
    pub state: &'static str,
    pub nodes: usize,
    pub root: Option<NodeId>,
    pub roots: Vec<NodeId>,
    pub adjacency: BTreeMap<NodeId, Vec<NodeId>>,
    pub dangling_edges: Vec<Edge>,
    pub error: Option<String>,
}

/// One questionnaire session. Loads at most once.
#[derive(Debug)]
pub struct Guide {
    state: GuideState,
    start_id: Option<NodeId>,
    graph: Option<Arc<GraphStore>>,
}

impl Guide {
    pub fn new(start_id: Option<NodeId>) -> Self {
        Self {
            state: GuideState::Loading,
            start_id,
            graph: None,
        }
    }

    /// Fetch through `loader` and leave the Loading state.
    #[instrument(level = "debug", skip_all)]
    pub fn load(&mut self, loader: &LoadService) -> &GuideState {
        if !matches!(self.state, GuideState::Loading) {
            warn!("guide already loaded (state: {}), reload ignored", self.state.name());
            return &self.state;
        }
        match loader.fetch() {
            Ok(dataset) => self.install(dataset),
            Err(e) => {
                warn!("load failed: {e}");
                self.state = GuideState::Error(e);
            }
        }
        &self.state
    }

    /// Leave the Loading state with an already fetched dataset.
    pub fn load_dataset(&mut self, dataset: Dataset) -> &GuideState {
        if matches!(self.state, GuideState::Loading) {
            self.install(dataset);
        } else {
            warn!("guide already loaded (state: {}), reload ignored", self.state.name());
        }
        &self.state
    }

    fn install(&mut self, dataset: Dataset) {
        let (nodes, edges) = dataset.into_parts();
        let graph = Arc::new(GraphStore::build(nodes, &edges));
        self.graph = Some(Arc::clone(&graph));

        self.state = match graph.resolve_root(self.start_id) {
            Ok(root) => match Navigator::new(graph, root) {
                Ok(navigator) => {
                    info!("guide ready at root {root}");
                    GuideState::Ready(navigator)
                }
                Err(e) => GuideState::Error(e),
            },
            Err(DomainError::EmptyDataset) | Err(DomainError::NoRoot) => {
                warn!("dataset has no usable root node");
                GuideState::Empty
            }
            Err(e) => GuideState::Error(e.into()),
        };
        debug!("guide state: {}", self.state.name());
    }

    pub fn state(&self) -> &GuideState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, GuideState::Ready(_))
    }

    pub fn navigator(&self) -> ApplicationResult<&Navigator> {
        match &self.state {
            GuideState::Ready(navigator) => Ok(navigator),
            other => Err(ApplicationError::NotReady { state: other.name() }),
        }
    }

    /// Mutable access for click/activate/back; only in Ready.
    pub fn navigator_mut(&mut self) -> ApplicationResult<&mut Navigator> {
        match &mut self.state {
            GuideState::Ready(navigator) => Ok(navigator),
            other => Err(ApplicationError::NotReady { state: other.name() }),
        }
    }

    pub fn debug_snapshot(&self) -> DebugSnapshot {
        let root = self.navigator().ok().map(|nav| nav.path()[0]);
        let error = match &self.state {
            GuideState::Error(e) => Some(e.to_string()),
            _ => None,
        };
        let (nodes, roots, adjacency, dangling_edges) = match &self.graph {
            Some(graph) => (
                graph.len(),
                graph.roots(),
                graph.adjacency(),
                graph.dangling_edges().to_vec(),
            ),
            None => (0, Vec::new(), BTreeMap::new(), Vec::new()),
        };
        DebugSnapshot {
            state: self.state.name(),
            nodes,
            root,
            roots,
            adjacency,
            dangling_edges,
            error,
        }
    }
}
