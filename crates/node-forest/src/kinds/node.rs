use std::any::Any;
use std::cmp::Ordering;

use crate::contract::{compare_as, Contract, Payload, PayloadKind};
use crate::forest::Forest;
use crate::types::NodeId;

/// A node whose payload is another node.
///
/// Comparison looks through to the wrapped nodes. There is no rendering:
/// wrappers can nest arbitrarily deep, and text is never built by recursion.
/// The forest unwraps nested wrappers in a loop, so depth is not bounded by
/// the call stack.
///
/// When the wrapper owns its payload, destroying the wrapper destroys the
/// wrapped node (recursively). A non-owning wrapper leaves it alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeKind;

impl Contract for NodeKind {
    fn name(&self) -> &'static str {
        "node"
    }

    fn size(&self) -> usize {
        std::mem::size_of::<NodeId>()
    }

    fn destroy(&self, payload: Payload, doomed: &mut Vec<NodeId>) {
        if let Ok(inner) = payload.downcast::<NodeId>() {
            doomed.push(*inner);
        }
    }

    fn compare(&self, forest: &Forest, a: &dyn Any, b: &dyn Any) -> Option<Ordering> {
        compare_as::<NodeId>(a, b, |a, b| forest.compare(*a, *b))
    }

    fn wrapped(&self, payload: &dyn Any) -> Option<NodeId> {
        payload.downcast_ref::<NodeId>().copied()
    }

    fn stringify(&self, _payload: &dyn Any) -> Option<String> {
        None
    }
}

impl PayloadKind for NodeKind {
    type Init = NodeId;
    type Value = NodeId;

    fn construct(&self, forest: &Forest, init: &NodeId) -> Option<NodeId> {
        forest.contains(*init).then_some(*init)
    }
}
