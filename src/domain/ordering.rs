//! Display order of a sibling set.

use itertools::Itertools;

use crate::domain::{LevelState, Node, NodeId};

/// Sort siblings for display.
///
/// Keys, by priority:
/// 1. the level's auto-revealed node goes strictly last
/// 2. effectively hidden nodes before effectively visible ones
/// 3. edge order under the parent
///
/// Stable and idempotent for unchanged inputs.
pub fn order_siblings<'a>(
    siblings: &[&'a Node],
    state: &LevelState,
    auto_revealed: Option<NodeId>,
) -> Vec<&'a Node> {
    siblings
        .iter()
        .enumerate()
        .sorted_by_key(|(index, node)| {
            (
                Some(node.id) == auto_revealed,
                state.is_effectively_visible(node),
                *index,
            )
        })
        .map(|(_, node)| *node)
        .collect()
}
