use node_forest::{Forest, IntKind, NodeError, NodeId, Ring};

fn ints(forest: &mut Forest, values: &[i64]) -> Vec<NodeId> {
    values.iter().map(|v| forest.int(*v).unwrap()).collect()
}

fn value(forest: &Forest, id: Option<NodeId>) -> Option<i64> {
    id.and_then(|id| forest.payload::<IntKind>(id).copied())
}

fn pop_int(ring: &mut Ring, forest: &mut Forest) -> Option<i64> {
    let id = ring.pop(forest);
    value(forest, id)
}

fn dequeue_int(ring: &mut Ring, forest: &mut Forest) -> Option<i64> {
    let id = ring.dequeue(forest);
    value(forest, id)
}

#[test]
fn empty_ring_yields_nothing() {
    let mut forest = Forest::new();
    let mut ring = Ring::new();

    assert!(ring.is_empty());
    assert_eq!(ring.len(), 0);
    assert_eq!(ring.pop(&mut forest), None);
    assert_eq!(ring.dequeue(&mut forest), None);
    assert_eq!(ring.peek(&forest), None);
    assert_eq!(ring.peek_bottom(&forest), None);
}

#[test]
fn stack_law() {
    let mut forest = Forest::new();
    let values = ints(&mut forest, &[1, 2, 3, 4]);
    let mut ring = Ring::new();
    for id in &values {
        ring.push(&mut forest, *id).unwrap();
    }
    assert_eq!(ring.len(), 4);

    let popped: Vec<_> = std::iter::from_fn(|| ring.pop(&mut forest)).collect();
    assert_eq!(popped, vec![values[3], values[2], values[1], values[0]]);
    assert!(ring.is_empty());
}

#[test]
fn queue_law() {
    let mut forest = Forest::new();
    let values = ints(&mut forest, &[1, 2, 3, 4]);
    let mut ring = Ring::new();
    for id in &values {
        ring.enqueue(&mut forest, *id).unwrap();
    }

    let dequeued: Vec<_> = std::iter::from_fn(|| ring.dequeue(&mut forest)).collect();
    assert_eq!(dequeued, values);
    assert!(ring.is_empty());
}

#[test]
fn single_element_dequeue_matches_pop() {
    let mut forest = Forest::new();
    let only = forest.int(9).unwrap();
    let mut ring = Ring::new();

    ring.push(&mut forest, only).unwrap();
    assert_eq!(ring.peek(&forest), Some(only));
    assert_eq!(ring.peek_bottom(&forest), Some(only));
    assert_eq!(ring.dequeue(&mut forest), Some(only));
    assert!(ring.is_empty());

    ring.push(&mut forest, only).unwrap();
    assert_eq!(ring.pop(&mut forest), Some(only));
    assert!(ring.is_empty());
}

#[test]
fn mixed_operations_keep_links_consistent() {
    let mut forest = Forest::new();
    let v = ints(&mut forest, &[1, 2, 3, 4, 5]);
    let mut ring = Ring::new();

    ring.push(&mut forest, v[0]).unwrap();
    ring.push(&mut forest, v[1]).unwrap();
    ring.push(&mut forest, v[2]).unwrap();
    // [bottom] 1 2 3 [top]
    assert_eq!(dequeue_int(&mut ring, &mut forest), Some(1));
    assert_eq!(pop_int(&mut ring, &mut forest), Some(3));
    // 2
    ring.push(&mut forest, v[3]).unwrap();
    ring.push(&mut forest, v[4]).unwrap();
    // 2 4 5
    assert_eq!(value(&forest, ring.peek(&forest)), Some(5));
    assert_eq!(value(&forest, ring.peek_bottom(&forest)), Some(2));
    assert_eq!(ring.len(), 3);

    assert_eq!(dequeue_int(&mut ring, &mut forest), Some(2));
    assert_eq!(dequeue_int(&mut ring, &mut forest), Some(4));
    assert_eq!(pop_int(&mut ring, &mut forest), Some(5));
    assert_eq!(ring.pop(&mut forest), None);
}

#[test]
fn wrappers_never_destroy_values() {
    let mut forest = Forest::new();
    let values = ints(&mut forest, &[10, 20, 30]);
    let mut ring = Ring::new();
    for id in &values {
        ring.push(&mut forest, *id).unwrap();
    }
    assert_eq!(forest.node_count(), 6);

    ring.pop(&mut forest);
    ring.dequeue(&mut forest);
    assert_eq!(forest.node_count(), 4);

    ring.clear(&mut forest);
    assert!(ring.is_empty());
    assert_eq!(forest.node_count(), 3);
    for id in &values {
        assert!(forest.contains(*id));
    }
}

#[test]
fn value_may_appear_more_than_once() {
    let mut forest = Forest::new();
    let shared = forest.text("shared").unwrap();
    let mut ring = Ring::new();
    ring.push(&mut forest, shared).unwrap();
    ring.push(&mut forest, shared).unwrap();

    assert_eq!(ring.len(), 2);
    assert_eq!(ring.pop(&mut forest), Some(shared));
    assert_eq!(ring.pop(&mut forest), Some(shared));
    assert_eq!(forest.node_count(), 1);
}

#[test]
fn push_of_dead_value_is_rejected() {
    let mut forest = Forest::new();
    let gone = forest.int(1).unwrap();
    forest.destroy(gone, true);
    let mut ring = Ring::new();

    assert_eq!(
        ring.push(&mut forest, gone),
        Err(NodeError::MissingNode(gone))
    );
    assert!(ring.is_empty());
}

#[test]
fn recycled_cells_stay_ordered() {
    let mut forest = Forest::new();
    let values = ints(&mut forest, &(0..64).collect::<Vec<_>>());
    let mut ring = Ring::new();

    for round in 0..4 {
        for id in &values {
            ring.enqueue(&mut forest, *id).unwrap();
        }
        for expected in &values {
            assert_eq!(ring.dequeue(&mut forest), Some(*expected), "round {round}");
        }
    }
    assert_eq!(forest.node_count(), 64);
}
