use crate::config::{SortScope, UnpositionedOrder};
use crate::model::TreeNode;

/// Order one sibling level by position
///
/// Stable for equal positions. Non-numeric positions follow `rule`:
/// with `Anchored` they stay in their slot and split the level into runs
/// that are sorted independently, with `Last` they move behind every
/// numeric entry. Either way they keep their order among themselves.
pub fn sort_by_position(level: &mut [TreeNode], rule: UnpositionedOrder) {
    match rule {
        UnpositionedOrder::Anchored => {
            for run in level.split_mut(|node| node.position.is_none()) {
                run.sort_by(|a, b| numeric(a).total_cmp(&numeric(b)));
            }
        }
        UnpositionedOrder::Last => {
            level.sort_by(|a, b| match (a.position, b.position) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
        }
    }
}

/// Apply `sort_by_position` to the roots, or to every level
pub fn sort_forest(forest: &mut [TreeNode], scope: SortScope, rule: UnpositionedOrder) {
    sort_by_position(forest, rule);
    if scope == SortScope::Recursive {
        for node in forest.iter_mut() {
            sort_forest(&mut node.children, scope, rule);
        }
    }
}

fn numeric(node: &TreeNode) -> f64 {
    // Runs produced by split_mut only contain positioned nodes
    node.position.unwrap_or(f64::NAN)
}
