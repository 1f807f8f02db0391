//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::NodeId;

/// Domain errors represent violations of the graph model.
/// Gating rejections are not errors; see [`crate::application::Rejection`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("dataset contains no nodes")]
    EmptyDataset,

    #[error("no resolvable root node")]
    NoRoot,
}
