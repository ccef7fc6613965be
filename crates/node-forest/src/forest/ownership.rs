//! Ownership edges: adoption into a child table and emancipation out of it.
//!
//! These are the only code paths that write a node's `owner`/`slot` or a
//! table slot, so invariants hold by construction:
//!
//! - every populated slot `i` of `P` holds a child whose owner is `P` and
//!   whose slot is `i`;
//! - a node sits in at most one table at a time.

use log::trace;

use super::Forest;
use crate::error::NodeError;
use crate::types::NodeId;

impl Forest {
    /// Adopts `child` into `parent` at `index` and returns the new table length.
    ///
    /// A different occupant of `index` is detached (left ownerless, not
    /// destroyed). `child` is detached from any previous owner. Re-inserting
    /// a child into the parent that already owns it is rejected, whatever
    /// the index. Nothing changes when an error is returned.
    pub fn put(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<usize, NodeError> {
        let previous_owner = self.node(child).ok_or(NodeError::MissingNode(child))?.owner;
        if !self.contains(parent) {
            return Err(NodeError::MissingNode(parent));
        }
        if previous_owner == Some(parent) {
            return Err(NodeError::DuplicateInsertion { parent, child });
        }
        if self.is_ancestor(child, parent) {
            return Err(NodeError::Cycle { parent, child });
        }

        self.table_mut(parent)?.reserve_for(index)?;

        self.emancipate(child);
        let displaced = self.table_mut(parent)?.set(index, child);
        if let Some(displaced) = displaced {
            self.clear_owner(displaced);
        }
        if let Some(node) = self.node_mut(child) {
            node.owner = Some(parent);
            node.slot = index;
        }
        trace!("{parent}[{index}] <- {child}");
        Ok(self.len(parent))
    }

    /// Appends `child` after the last populated slot of `parent`.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<usize, NodeError> {
        let index = self.len(parent);
        self.put(parent, index, child)
    }

    /// Detaches and returns the child at `index`, or `None` if the slot is empty.
    pub fn release(&mut self, parent: NodeId, index: usize) -> Option<NodeId> {
        let child = self.child(parent, index)?;
        self.emancipate(child);
        Some(child)
    }

    /// Detaches and returns the child in the highest populated slot.
    pub fn pop_child(&mut self, parent: NodeId) -> Option<NodeId> {
        let last = self.len(parent).checked_sub(1)?;
        self.release(parent, last)
    }

    /// Detaches `id` from its owner, tightening the owner's table.
    ///
    /// Returns `false` if the node had no owner.
    pub fn emancipate(&mut self, id: NodeId) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let Some(owner) = node.owner.take() else {
            return false;
        };
        let slot = std::mem::take(&mut node.slot);
        if let Some(parent) = self.node_mut(owner) {
            if parent.table.get(slot) == Some(id) {
                parent.table.take(slot);
                parent.table.tighten();
            }
        }
        trace!("{owner}[{slot}] -> {id}");
        true
    }

    /// Whether `ancestor` is `id` itself or sits on its owner chain.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.owner(node);
        }
        false
    }

    fn clear_owner(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.owner = None;
            node.slot = 0;
            trace!("{id} displaced");
        }
    }

    fn table_mut(&mut self, id: NodeId) -> Result<&mut super::ChildTable, NodeError> {
        self.node_mut(id)
            .map(|node| &mut node.table)
            .ok_or(NodeError::MissingNode(id))
    }
}
