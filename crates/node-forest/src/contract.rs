//! Payload capability contract.
//!
//! A node never knows the concrete type of its payload. Everything the engine
//! needs (teardown, ordering, rendering, a display name) goes through the
//! object-safe [`Contract`] attached to the node at construction time.
//! Construction itself is typed and lives in [`PayloadKind`], so callers hand
//! over a real `&str` or `i64` instead of an untyped blob.
//!
//! Contracts are `'static` values shared by every node of their kind; the
//! forest only ever borrows them.

use std::any::{Any, TypeId};
use std::cmp::Ordering;

use crate::forest::Forest;
use crate::types::NodeId;

/// Type-erased payload as stored on a node.
pub type Payload = Box<dyn Any>;

/// Object-safe half of the capability contract.
pub trait Contract: 'static {
    /// Human-readable label of the kind.
    fn name(&self) -> &'static str;

    /// Nominal payload size in bytes. Informational only.
    fn size(&self) -> usize;

    /// Tears down a payload owned by a node being destroyed.
    ///
    /// Called only for nodes created with `owns_payload = true`. The default
    /// drops the value. Kinds that hold forest handles push them onto
    /// `doomed`; the forest destroys those (recursively) in the same pass.
    fn destroy(&self, payload: Payload, _doomed: &mut Vec<NodeId>) {
        drop(payload);
    }

    /// Orders two payloads of this kind. `None` means incomparable.
    fn compare(&self, forest: &Forest, a: &dyn Any, b: &dyn Any) -> Option<Ordering>;

    /// Renders the payload as text, if the kind has a rendering.
    fn stringify(&self, payload: &dyn Any) -> Option<String>;

    /// Borrowed rendering for kinds whose payload already is text.
    fn as_text<'a>(&self, _payload: &'a dyn Any) -> Option<&'a str> {
        None
    }

    /// The node a wrapper payload stands for. Comparison looks through it.
    fn wrapped(&self, _payload: &dyn Any) -> Option<NodeId> {
        None
    }

    /// Identity of the kind. Two nodes are comparable only if these match.
    fn kind_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

/// Typed construction half of the contract.
pub trait PayloadKind: Contract + Sized {
    /// What callers pass to [`Forest::create`].
    type Init: ?Sized;
    /// What ends up boxed on the node.
    type Value: 'static;

    /// Builds a payload, or `None` when `init` is not acceptable.
    fn construct(&self, forest: &Forest, init: &Self::Init) -> Option<Self::Value>;
}

/// Downcasts both operands to `T` and orders them with `cmp`.
pub(crate) fn compare_as<T: 'static>(
    a: &dyn Any,
    b: &dyn Any,
    cmp: impl FnOnce(&T, &T) -> Option<Ordering>,
) -> Option<Ordering> {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => None,
    }
}
