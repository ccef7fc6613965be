//! Error type shared by every fallible forest operation.

use thiserror::Error;

use crate::types::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// The payload kind rejected the init value (e.g. empty text).
    #[error("{kind} payload rejected its init value")]
    Construct { kind: &'static str },
    /// A node slot or child table could not be allocated.
    #[error("allocation of {requested} slots failed")]
    Allocation { requested: usize },
    /// The operands carry different payload kinds, or their payloads do not
    /// order against each other.
    #[error("cannot compare {left} with {right}")]
    TypeMismatch {
        left: &'static str,
        right: &'static str,
    },
    /// The child is already held by the target parent.
    #[error("{child} is already owned by {parent}")]
    DuplicateInsertion { parent: NodeId, child: NodeId },
    /// The handle is stale or was never issued by this forest.
    #[error("{0} does not refer to a live node")]
    MissingNode(NodeId),
    /// Adopting the child would make a node its own ancestor.
    #[error("adopting {child} under {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}
