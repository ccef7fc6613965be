//! The node arena: lifecycle, payload access and comparison.
//!
//! Ownership edges (adopt, emancipate, release) live in [`ownership`]; the
//! child table policy lives in [`table`].

mod ownership;
mod table;

use std::cmp::Ordering;

use log::debug;

use crate::contract::{Contract, Payload, PayloadKind};
use crate::error::NodeError;
use crate::kinds::{NodeKind, INT, NODE, TEXT};
use crate::types::NodeId;

use table::ChildTable;

pub(crate) struct Node {
    payload: Payload,
    contract: &'static dyn Contract,
    owns_payload: bool,
    table: ChildTable,
    owner: Option<NodeId>,
    slot: usize,
    weight: usize,
    cached_text: Option<String>,
}

struct Entry {
    generation: u32,
    node: Option<Node>,
}

/// Arena of type-erased nodes.
///
/// Every node is addressed by a [`NodeId`]. A node may hold child nodes in an
/// index-addressable table; each child has exactly one owner, and moving it
/// somewhere else always detaches it from the previous owner first.
///
/// Dropping the forest frees every remaining node without running payload
/// destroy hooks.
#[derive(Default)]
pub struct Forest {
    entries: Vec<Entry>,
    free: Vec<u32>,
    live: usize,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.live
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Creates an ownerless node with an empty child table.
    ///
    /// Fails with [`NodeError::Construct`] when the kind rejects `init`.
    /// When `owns_payload` is false the kind's destroy hook never runs for
    /// this node.
    pub fn create<K: PayloadKind>(
        &mut self,
        kind: &'static K,
        init: &K::Init,
        owns_payload: bool,
    ) -> Result<NodeId, NodeError> {
        let value = kind
            .construct(self, init)
            .ok_or(NodeError::Construct { kind: kind.name() })?;
        let payload: Payload = Box::new(value);
        let cached_text = match kind.as_text(&*payload) {
            Some(_) => None,
            None => kind.stringify(&*payload),
        };
        let id = self.alloc(Node {
            payload,
            contract: kind,
            owns_payload,
            table: ChildTable::default(),
            owner: None,
            slot: 0,
            weight: 0,
            cached_text,
        })?;
        debug!("created {id} ({})", kind.name());
        Ok(id)
    }

    /// Shorthand for an owning [`TextKind`](crate::TextKind) node.
    pub fn text(&mut self, text: &str) -> Result<NodeId, NodeError> {
        self.create(&TEXT, text, true)
    }

    /// Shorthand for an owning [`IntKind`](crate::IntKind) node.
    pub fn int(&mut self, value: i64) -> Result<NodeId, NodeError> {
        self.create(&INT, &value, true)
    }

    /// Wraps `inner` in a [`NodeKind`] node.
    ///
    /// An owning wrapper destroys `inner` when it is destroyed itself.
    pub fn wrap(&mut self, inner: NodeId, owns_payload: bool) -> Result<NodeId, NodeError> {
        if !self.contains(inner) {
            return Err(NodeError::MissingNode(inner));
        }
        self.create(&NODE, &inner, owns_payload)
    }

    /// The node wrapped by a [`NodeKind`] wrapper.
    pub fn unwrap_node(&self, wrapper: NodeId) -> Option<NodeId> {
        self.payload::<NodeKind>(wrapper).copied()
    }

    /// Destroys a node.
    ///
    /// The node is detached from its owner first. With `recursive`, every
    /// descendant is destroyed too; otherwise the children survive ownerless.
    /// Nodes released by a payload destroy hook (the wrapped node of an
    /// owning wrapper) are always destroyed recursively. Stale handles are
    /// ignored.
    pub fn destroy(&mut self, id: NodeId, recursive: bool) {
        let mut pending = vec![(id, recursive)];
        let mut doomed = Vec::new();
        while let Some((current, recursive)) = pending.pop() {
            self.emancipate(current);
            // Already gone when reached twice, e.g. a wrapper owning its own child.
            let Some(node) = self.dealloc(current) else {
                continue;
            };
            for (_, child) in node.table.iter() {
                if recursive {
                    pending.push((child, true));
                } else if let Some(orphan) = self.node_mut(child) {
                    orphan.owner = None;
                    orphan.slot = 0;
                }
            }
            debug!("destroyed {current} ({})", node.contract.name());
            if node.owns_payload {
                node.contract.destroy(node.payload, &mut doomed);
                pending.extend(doomed.drain(..).map(|inner| (inner, true)));
            }
        }
    }

    /// Orders two nodes by payload.
    ///
    /// The same handle is always equal to itself. Absent nodes and nodes of
    /// different kinds are incomparable (`None`). Wrappers are looked through
    /// iteratively until a pair of non-wrapper payloads is reached.
    pub fn compare(&self, a: NodeId, b: NodeId) -> Option<Ordering> {
        let (mut a, mut b) = (a, b);
        loop {
            if a == b {
                return Some(Ordering::Equal);
            }
            let (left, right) = (self.node(a)?, self.node(b)?);
            if left.contract.kind_id() != right.contract.kind_id() {
                return None;
            }
            match (
                left.contract.wrapped(&*left.payload),
                right.contract.wrapped(&*right.payload),
            ) {
                (Some(inner_a), Some(inner_b)) => (a, b) = (inner_a, inner_b),
                _ => return left.contract.compare(self, &*left.payload, &*right.payload),
            }
        }
    }

    /// Renders the payload, refreshing the cached text.
    ///
    /// Text payloads are their own rendering. Kinds without a rendering (such
    /// as [`NodeKind`]) give `None`.
    pub fn render(&mut self, id: NodeId) -> Option<&str> {
        let node = self.node_mut(id)?;
        let contract = node.contract;
        if contract.as_text(&*node.payload).is_none() {
            node.cached_text = contract.stringify(&*node.payload);
            return node.cached_text.as_deref();
        }
        contract.as_text(&*node.payload)
    }

    /// Last rendering without recomputing it.
    pub fn cached_text(&self, id: NodeId) -> Option<&str> {
        let node = self.node(id)?;
        node.contract
            .as_text(&*node.payload)
            .or(node.cached_text.as_deref())
    }

    /// Typed view of a payload; `None` if the node is of another kind.
    pub fn payload<K: PayloadKind>(&self, id: NodeId) -> Option<&K::Value> {
        let node = self.node(id)?;
        if node.contract.kind_id() != std::any::TypeId::of::<K>() {
            return None;
        }
        node.payload.downcast_ref::<K::Value>()
    }

    pub fn contract_name(&self, id: NodeId) -> Option<&'static str> {
        self.node(id).map(|node| node.contract.name())
    }

    pub fn owns_payload(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|node| node.owns_payload)
    }

    /// One past the highest populated child slot.
    pub fn len(&self, id: NodeId) -> usize {
        self.node(id).map_or(0, |node| node.table.len())
    }

    /// Allocated child slots. Zero means no table is held at all.
    pub fn capacity(&self, id: NodeId) -> usize {
        self.node(id).map_or(0, |node| node.table.capacity())
    }

    /// Whether the node currently holds child table storage.
    pub fn has_table(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|node| node.table.is_allocated())
    }

    pub fn owner(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.owner
    }

    /// Index within the owner's table, while the node has an owner.
    pub fn slot(&self, id: NodeId) -> Option<usize> {
        let node = self.node(id)?;
        node.owner.map(|_| node.slot)
    }

    /// Child at `index`, left in place.
    pub fn child(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.node(parent)?.table.get(index)
    }

    /// Populated child slots of `parent` in index order.
    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.node(parent)
            .into_iter()
            .flat_map(|node| node.table.iter())
    }

    /// Tree weight recorded by [`tree::insert`](crate::tree::insert).
    pub fn weight(&self, id: NodeId) -> usize {
        self.node(id).map_or(0, |node| node.weight)
    }

    pub(crate) fn set_weight(&mut self, id: NodeId, weight: usize) {
        if let Some(node) = self.node_mut(id) {
            node.weight = weight;
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        let entry = self.entries.get(id.index as usize)?;
        if entry.generation != id.generation {
            return None;
        }
        entry.node.as_ref()
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let entry = self.entries.get_mut(id.index as usize)?;
        if entry.generation != id.generation {
            return None;
        }
        entry.node.as_mut()
    }

    fn alloc(&mut self, node: Node) -> Result<NodeId, NodeError> {
        if let Some(index) = self.free.pop() {
            let entry = &mut self.entries[index as usize];
            entry.node = Some(node);
            self.live += 1;
            return Ok(NodeId::new(index, entry.generation));
        }
        let index = u32::try_from(self.entries.len()).map_err(|_| NodeError::Allocation {
            requested: self.entries.len() + 1,
        })?;
        self.entries
            .try_reserve(1)
            .map_err(|_| NodeError::Allocation {
                requested: self.entries.len() + 1,
            })?;
        self.entries.push(Entry {
            generation: 0,
            node: Some(node),
        });
        self.live += 1;
        Ok(NodeId::new(index, 0))
    }

    /// Vacates the arena slot; the handle goes stale.
    fn dealloc(&mut self, id: NodeId) -> Option<Node> {
        let entry = self.entries.get_mut(id.index as usize)?;
        if entry.generation != id.generation {
            return None;
        }
        let node = entry.node.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(node)
    }
}
