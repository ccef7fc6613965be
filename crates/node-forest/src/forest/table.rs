//! Child table with doubling growth and 1:4 shrink hysteresis.
//!
//! The table tracks its logical `len` (one past the highest populated slot)
//! separately from its allocated `capacity`. No storage is held while the
//! table is empty.

use log::trace;

use crate::error::NodeError;
use crate::types::NodeId;

#[derive(Debug, Default)]
pub(crate) struct ChildTable {
    slots: Option<Box<[Option<NodeId>]>>,
    len: usize,
}

impl ChildTable {
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.as_ref().map_or(0, |slots| slots.len())
    }

    pub(crate) fn is_allocated(&self) -> bool {
        self.slots.is_some()
    }

    pub(crate) fn get(&self, index: usize) -> Option<NodeId> {
        if index >= self.len {
            return None;
        }
        self.slots.as_ref().and_then(|slots| slots[index])
    }

    /// Makes `index` addressable, growing to `max(index, 1) * 2` slots.
    ///
    /// On failure the table is left exactly as it was.
    pub(crate) fn reserve_for(&mut self, index: usize) -> Result<(), NodeError> {
        if index < self.capacity() {
            return Ok(());
        }
        let capacity = index
            .max(1)
            .checked_mul(2)
            .ok_or(NodeError::Allocation { requested: index })?;
        self.resize(capacity)
    }

    /// Stores `child` at `index` and returns the previous occupant.
    ///
    /// `index` must already be addressable (see [`reserve_for`](Self::reserve_for)).
    pub(crate) fn set(&mut self, index: usize, child: NodeId) -> Option<NodeId> {
        let slots = self.slots.as_mut()?;
        if index >= self.len {
            slots[self.len..index].fill(None);
            self.len = index + 1;
        }
        slots[index].replace(child)
    }

    /// Clears `index` without tightening.
    pub(crate) fn take(&mut self, index: usize) -> Option<NodeId> {
        if index >= self.len {
            return None;
        }
        self.slots.as_mut().and_then(|slots| slots[index].take())
    }

    /// Trims trailing empty slots and gives back storage.
    ///
    /// An empty table frees its storage; a table under a quarter full halves
    /// its capacity (never below `len`).
    pub(crate) fn tighten(&mut self) {
        let Some(slots) = self.slots.as_ref() else {
            return;
        };
        while self.len > 0 && slots[self.len - 1].is_none() {
            self.len -= 1;
        }
        let capacity = slots.len();
        if self.len == 0 {
            trace!("child table released ({capacity} slots)");
            self.slots = None;
        } else if self.len < capacity / 4 {
            // A failed shrink keeps the larger table, which is still valid.
            let _ = self.resize((capacity / 2).max(self.len));
        }
    }

    /// Populated slots in index order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.slots
            .iter()
            .flat_map(|slots| slots[..self.len].iter().enumerate())
            .filter_map(|(index, slot)| slot.map(|child| (index, child)))
    }

    fn resize(&mut self, capacity: usize) -> Result<(), NodeError> {
        let mut slots: Vec<Option<NodeId>> = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| NodeError::Allocation {
                requested: capacity,
            })?;
        if let Some(old) = self.slots.as_ref() {
            slots.extend_from_slice(&old[..self.len]);
        }
        slots.resize(capacity, None);
        trace!("child table resized {} -> {capacity}", self.capacity());
        self.slots = Some(slots.into_boxed_slice());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: u32) -> NodeId {
        NodeId::new(index, 0)
    }

    fn put(table: &mut ChildTable, index: usize, child: NodeId) -> Option<NodeId> {
        table.reserve_for(index).unwrap();
        table.set(index, child)
    }

    #[test]
    fn grows_by_doubling_the_requested_index() {
        let mut table = ChildTable::default();
        assert_eq!(table.capacity(), 0);
        assert!(!table.is_allocated());

        put(&mut table, 0, id(0));
        assert_eq!((table.len(), table.capacity()), (1, 2));

        put(&mut table, 1, id(1));
        assert_eq!((table.len(), table.capacity()), (2, 2));

        put(&mut table, 2, id(2));
        assert_eq!((table.len(), table.capacity()), (3, 4));

        put(&mut table, 9, id(9));
        assert_eq!((table.len(), table.capacity()), (10, 18));
        assert_eq!(table.get(5), None);
        assert_eq!(table.get(9), Some(id(9)));
    }

    #[test]
    fn set_returns_previous_occupant() {
        let mut table = ChildTable::default();
        assert_eq!(put(&mut table, 3, id(1)), None);
        assert_eq!(put(&mut table, 3, id(2)), Some(id(1)));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn tighten_trims_trailing_holes_and_frees_when_empty() {
        let mut table = ChildTable::default();
        put(&mut table, 0, id(0));
        put(&mut table, 4, id(4));
        assert_eq!(table.len(), 5);

        table.take(4);
        table.tighten();
        assert_eq!(table.len(), 1);

        table.take(0);
        table.tighten();
        assert_eq!(table.len(), 0);
        assert_eq!(table.capacity(), 0);
        assert!(!table.is_allocated());
    }

    #[test]
    fn tighten_halves_below_quarter_occupancy() {
        let mut table = ChildTable::default();
        for i in 0..16 {
            put(&mut table, i, id(i as u32));
        }
        assert_eq!(table.capacity(), 16);

        // 4 of 16 is not below a quarter.
        for i in (4..16).rev() {
            table.take(i);
        }
        table.tighten();
        assert_eq!((table.len(), table.capacity()), (4, 16));

        table.take(3);
        table.tighten();
        assert_eq!((table.len(), table.capacity()), (3, 8));
        assert_eq!(table.get(2), Some(id(2)));
    }

    #[test]
    fn iter_skips_holes() {
        let mut table = ChildTable::default();
        put(&mut table, 1, id(1));
        put(&mut table, 3, id(3));
        let seen: Vec<_> = table.iter().collect();
        assert_eq!(seen, vec![(1, id(1)), (3, id(3))]);
    }
}
