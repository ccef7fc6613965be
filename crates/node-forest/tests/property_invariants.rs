use std::collections::VecDeque;

use node_forest::tree;
use node_forest::{Forest, IntKind, NodeId, Order, Ring};
use proptest::prelude::*;

const POOL: usize = 6;

#[derive(Debug, Clone)]
enum Edge {
    Put(usize, usize, usize),
    Release(usize, usize),
    PopChild(usize),
    Emancipate(usize),
}

fn edge() -> impl Strategy<Value = Edge> {
    prop_oneof![
        4 => (0..POOL, 0..12usize, 0..POOL).prop_map(|(p, i, c)| Edge::Put(p, i, c)),
        2 => (0..POOL, 0..12usize).prop_map(|(p, i)| Edge::Release(p, i)),
        1 => (0..POOL).prop_map(Edge::PopChild),
        1 => (0..POOL).prop_map(Edge::Emancipate),
    ]
}

fn check_forest(forest: &Forest, nodes: &[NodeId]) -> Result<(), TestCaseError> {
    let mut seen = Vec::new();
    for &node in nodes {
        let len = forest.len(node);
        let capacity = forest.capacity(node);
        prop_assert_eq!(capacity == 0, !forest.has_table(node));
        prop_assert_eq!(len == 0, !forest.has_table(node));
        prop_assert!(len <= capacity);
        if len > 0 {
            prop_assert!(forest.child(node, len - 1).is_some());
        }
        for (slot, child) in forest.children(node) {
            prop_assert_eq!(forest.owner(child), Some(node));
            prop_assert_eq!(forest.slot(child), Some(slot));
            prop_assert!(!seen.contains(&child), "{} held twice", child);
            seen.push(child);
        }
        if let (Some(owner), Some(slot)) = (forest.owner(node), forest.slot(node)) {
            prop_assert_eq!(forest.child(owner, slot), Some(node));
        }

        let mut hops = 0;
        let mut current = forest.owner(node);
        while let Some(up) = current {
            hops += 1;
            prop_assert!(hops <= nodes.len(), "owner chain of {} loops", node);
            current = forest.owner(up);
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
enum RingOp {
    Push(i64),
    Pop,
    Dequeue,
}

fn ring_op() -> impl Strategy<Value = RingOp> {
    prop_oneof![
        3 => any::<i64>().prop_map(RingOp::Push),
        1 => Just(RingOp::Pop),
        1 => Just(RingOp::Dequeue),
    ]
}

proptest! {
    #[test]
    fn ownership_edges_stay_consistent(edges in prop::collection::vec(edge(), 1..64)) {
        let mut forest = Forest::new();
        let nodes: Vec<NodeId> = (0..POOL as i64).map(|n| forest.int(n).unwrap()).collect();

        for edge in edges {
            match edge {
                Edge::Put(p, i, c) => {
                    let before = forest.len(nodes[p]);
                    match forest.put(nodes[p], i, nodes[c]) {
                        Ok(len) => {
                            prop_assert_eq!(len, before.max(i + 1));
                            prop_assert_eq!(forest.child(nodes[p], i), Some(nodes[c]));
                        }
                        Err(_) => {
                            prop_assert_eq!(forest.len(nodes[p]), before);
                        }
                    }
                }
                Edge::Release(p, i) => {
                    let expected = forest.child(nodes[p], i);
                    prop_assert_eq!(forest.release(nodes[p], i), expected);
                    if let Some(child) = expected {
                        prop_assert_eq!(forest.owner(child), None);
                    }
                }
                Edge::PopChild(p) => {
                    if let Some(child) = forest.pop_child(nodes[p]) {
                        prop_assert_eq!(forest.owner(child), None);
                    }
                }
                Edge::Emancipate(c) => {
                    let had_owner = forest.owner(nodes[c]).is_some();
                    prop_assert_eq!(forest.emancipate(nodes[c]), had_owner);
                }
            }
            check_forest(&forest, &nodes)?;
        }

        prop_assert_eq!(forest.node_count(), POOL);
    }

    #[test]
    fn ring_matches_deque_model(ops in prop::collection::vec(ring_op(), 0..128)) {
        let mut forest = Forest::new();
        let mut ring = Ring::new();
        let mut model: VecDeque<NodeId> = VecDeque::new();

        for op in ops {
            match op {
                RingOp::Push(value) => {
                    let node = forest.int(value).unwrap();
                    ring.push(&mut forest, node).unwrap();
                    model.push_back(node);
                }
                RingOp::Pop => {
                    prop_assert_eq!(ring.pop(&mut forest), model.pop_back());
                }
                RingOp::Dequeue => {
                    prop_assert_eq!(ring.dequeue(&mut forest), model.pop_front());
                }
            }
            prop_assert_eq!(ring.len(), model.len());
            prop_assert_eq!(ring.peek(&forest), model.back().copied());
            prop_assert_eq!(ring.peek_bottom(&forest), model.front().copied());
        }

        ring.clear(&mut forest);
        prop_assert!(ring.is_empty());
        for node in &model {
            prop_assert!(forest.contains(*node));
        }
    }

    #[test]
    fn bst_in_order_is_sorted(keys in prop::collection::vec(-500i64..500, 1..200)) {
        let mut forest = Forest::new();
        let root = forest.int(keys[0]).unwrap();
        for key in &keys[1..] {
            let node = forest.int(*key).unwrap();
            let weight = tree::insert(&mut forest, root, node).unwrap();
            prop_assert_eq!(weight, forest.weight(node));
        }
        prop_assert_eq!(forest.weight(root).max(1), keys.len());

        let walked: Vec<i64> = tree::collect(&forest, root, Order::In)
            .into_iter()
            .map(|id| *forest.payload::<IntKind>(id).unwrap())
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(walked, sorted);

        for order in [Order::Pre, Order::Post] {
            prop_assert_eq!(tree::collect(&forest, root, order).len(), keys.len());
        }

        forest.destroy(root, true);
        prop_assert_eq!(forest.node_count(), 0);
    }
}
