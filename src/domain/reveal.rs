//! Auto-reveal rule for the last hidden option of a level.

use crate::domain::{LevelState, Node, NodeId};

/// Return the sibling that should reveal itself, if any.
///
/// Fires only when exactly one sibling is effectively hidden and every other
/// gated sibling has been activated. Siblings without an activation
/// requirement impose no condition.
pub fn auto_reveal_candidate(siblings: &[&Node], state: &LevelState) -> Option<NodeId> {
    let mut hidden = siblings.iter().filter(|node| state.is_effectively_hidden(node));
    let candidate = hidden.next()?;
    if hidden.next().is_some() {
        return None;
    }

    siblings
        .iter()
        .filter(|node| node.id != candidate.id)
        .all(|node| !state.is_pending_activation(node))
        .then_some(candidate.id)
}
