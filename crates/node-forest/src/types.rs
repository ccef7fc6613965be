//! Handle and traversal types.
//!
//! Nodes never hold references to each other. Every link (owner, child slot,
//! wrapped node) is a [`NodeId`] into the [`Forest`](crate::Forest) arena, in
//! the same spirit as index-linked arena trees.

use std::fmt;

/// Stable handle to a node in a [`Forest`](crate::Forest).
///
/// The `generation` half changes every time the arena slot is recycled, so a
/// handle to a destroyed node never aliases whatever lives in its slot later.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Arena slot this handle points at.
    pub fn index(self) -> u32 {
        self.index
    }

    /// How many times the slot had been recycled when this handle was issued.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node #{}v{}", self.index, self.generation)
    }
}

/// Depth-first visiting order for [`tree::traverse`](crate::tree::traverse).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    /// self, left, right
    Pre,
    /// left, self, right
    In,
    /// left, right, self
    Post,
}
