//! Unbalanced binary search tree over the forest's child tables.
//!
//! Slot [`LEFT`] holds the left child and slot [`RIGHT`] the right child.
//! Keys comparing equal go right, so equal keys keep their insertion order in
//! an in-order walk.
//!
//! There is no rebalancing: depth is O(n) in the worst case, which is why
//! every walk below uses an explicit stack instead of recursion.

use std::cmp::Ordering;

use crate::error::NodeError;
use crate::forest::Forest;
use crate::types::{NodeId, Order};

pub const LEFT: usize = 0;
pub const RIGHT: usize = 1;

fn side(ordering: Ordering) -> usize {
    if ordering == Ordering::Less {
        LEFT
    } else {
        RIGHT
    }
}

fn mismatch(forest: &Forest, a: NodeId, b: NodeId) -> NodeError {
    NodeError::TypeMismatch {
        left: forest.contract_name(a).unwrap_or("?"),
        right: forest.contract_name(b).unwrap_or("?"),
    }
}

/// Inserts `node` under `root` and returns the inserted node's weight.
///
/// Each node on the descent path gains one unit of weight and `node` starts
/// at 1, so [`Forest::weight`] of the root counts the nodes inserted below
/// it. Weights are not touched by any other operation.
///
/// Fails without modifying anything if some comparison on the way down is
/// incomparable (different kinds).
pub fn insert(forest: &mut Forest, root: NodeId, node: NodeId) -> Result<usize, NodeError> {
    for id in [root, node] {
        if !forest.contains(id) {
            return Err(NodeError::MissingNode(id));
        }
    }

    let mut path = Vec::new();
    let mut current = root;
    let slot = loop {
        let Some(ordering) = forest.compare(node, current) else {
            return Err(mismatch(forest, node, current));
        };
        path.push(current);
        let slot = side(ordering);
        match forest.child(current, slot) {
            Some(next) => current = next,
            None => break slot,
        }
    };

    forest.put(current, slot, node)?;
    forest.set_weight(node, 1);
    for id in path {
        let weight = forest.weight(id).max(1);
        forest.set_weight(id, weight + 1);
    }
    Ok(forest.weight(node))
}

/// Finds a node comparing equal to `probe`.
pub fn find(forest: &Forest, root: NodeId, probe: NodeId) -> Option<NodeId> {
    let mut current = Some(root);
    while let Some(id) = current {
        match forest.compare(probe, id)? {
            Ordering::Equal => return Some(id),
            ordering => current = forest.child(id, side(ordering)),
        }
    }
    None
}

/// Visits every node under `root` exactly once, in `order`.
pub fn traverse<F>(forest: &Forest, root: NodeId, order: Order, mut visit: F)
where
    F: FnMut(NodeId),
{
    if !forest.contains(root) {
        return;
    }
    let left = |id: NodeId| forest.child(id, LEFT);
    let right = |id: NodeId| forest.child(id, RIGHT);

    match order {
        Order::Pre => {
            let mut stack = vec![root];
            while let Some(id) = stack.pop() {
                visit(id);
                stack.extend(right(id));
                stack.extend(left(id));
            }
        }
        Order::In => {
            let mut stack = Vec::new();
            let mut current = Some(root);
            loop {
                while let Some(id) = current {
                    stack.push(id);
                    current = left(id);
                }
                let Some(id) = stack.pop() else {
                    break;
                };
                visit(id);
                current = right(id);
            }
        }
        Order::Post => {
            let mut stack = vec![(root, false)];
            while let Some((id, expanded)) = stack.pop() {
                if expanded {
                    visit(id);
                    continue;
                }
                stack.push((id, true));
                stack.extend(right(id).map(|r| (r, false)));
                stack.extend(left(id).map(|l| (l, false)));
            }
        }
    }
}

/// Collects the nodes under `root` in `order`.
pub fn collect(forest: &Forest, root: NodeId, order: Order) -> Vec<NodeId> {
    let mut out = Vec::new();
    traverse(forest, root, order, |id| out.push(id));
    out
}

/// Renders the tree with one node per line, using cached payload text.
pub fn print(forest: &Forest, root: NodeId) -> String {
    if !forest.contains(root) {
        return "∅".to_string();
    }
    let mut out = String::new();
    let mut stack = vec![(root, String::new(), "└─")];
    while let Some((id, tab, arrow)) = stack.pop() {
        if !out.is_empty() {
            out.push('\n');
        }
        let label = forest.cached_text(id).unwrap_or("…");
        out.push_str(&format!("{tab}{arrow} {label}"));
        let child_tab = format!("{tab}  ");
        if let Some(r) = forest.child(id, RIGHT) {
            stack.push((r, child_tab.clone(), "→"));
        }
        if let Some(l) = forest.child(id, LEFT) {
            stack.push((l, child_tab, "←"));
        }
    }
    out
}
