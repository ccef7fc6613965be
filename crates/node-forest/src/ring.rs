//! Stack and queue over a circular doubly-linked ring.
//!
//! Pushing onto the top of the stack is the same action as enqueuing, so
//! [`Ring::enqueue`] is [`Ring::push`]. Only removal differs: [`Ring::pop`]
//! takes the top (LIFO), [`Ring::dequeue`] takes the bottom (FIFO).
//!
//! Every pushed value is held through a non-owning [`NodeKind`](crate::NodeKind)
//! wrapper node, so the ring never destroys the values it carries. The ring
//! links themselves live in the [`Ring`], not in the forest's owner/child
//! fields.
//!
//! ```text
//!          below          below
//!   top ─────────▶ ... ─────────▶ bottom
//!    ▲                              │
//!    └──────────────────────────────┘
//!                  below
//! ```
//!
//! `above` is the exact inverse of `below`, so the bottom is always one hop
//! away from the top.

use log::debug;

use crate::error::NodeError;
use crate::forest::Forest;
use crate::types::NodeId;

#[derive(Debug, Clone, Copy)]
struct Cell {
    wrapper: NodeId,
    above: usize,
    below: usize,
}

/// LIFO/FIFO sequence of forest nodes.
///
/// Wrappers are created in, and destroyed from, the forest passed to each
/// call; always use the same forest for a given ring. Call
/// [`clear`](Self::clear) before dropping a non-empty ring, or its wrappers
/// stay in the forest until the forest itself is dropped.
#[derive(Debug, Default)]
pub struct Ring {
    cells: Vec<Option<Cell>>,
    vacant: Vec<usize>,
    top: Option<usize>,
    len: usize,
}

impl Ring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Pushes `value` on top. O(1).
    pub fn push(&mut self, forest: &mut Forest, value: NodeId) -> Result<(), NodeError> {
        let wrapper = forest.wrap(value, false)?;
        let index = self.vacant.pop().unwrap_or(self.cells.len());
        let mut cell = Cell {
            wrapper,
            above: index,
            below: index,
        };
        if let Some(top) = self.top {
            let bottom = self.cell(top).above;
            cell.below = top;
            cell.above = bottom;
            self.cell_mut(top).above = index;
            self.cell_mut(bottom).below = index;
        }
        if index == self.cells.len() {
            self.cells.push(Some(cell));
        } else {
            self.cells[index] = Some(cell);
        }
        self.top = Some(index);
        self.len += 1;
        debug!("ring push {value} (len {})", self.len);
        Ok(())
    }

    /// Same as [`push`](Self::push).
    pub fn enqueue(&mut self, forest: &mut Forest, value: NodeId) -> Result<(), NodeError> {
        self.push(forest, value)
    }

    /// Removes and returns the most recently pushed value. O(1).
    pub fn pop(&mut self, forest: &mut Forest) -> Option<NodeId> {
        let top = self.top?;
        let cell = self.unlink(top);
        if self.top.is_some() {
            self.top = Some(cell.below);
        }
        let value = Self::unwrap(forest, cell);
        debug!("ring pop {value:?} (len {})", self.len);
        value
    }

    /// Removes and returns the least recently pushed value. O(1).
    pub fn dequeue(&mut self, forest: &mut Forest) -> Option<NodeId> {
        let top = self.top?;
        let bottom = self.cell(top).above;
        let cell = self.unlink(bottom);
        let value = Self::unwrap(forest, cell);
        debug!("ring dequeue {value:?} (len {})", self.len);
        value
    }

    /// The value [`pop`](Self::pop) would return.
    pub fn peek(&self, forest: &Forest) -> Option<NodeId> {
        let top = self.top?;
        forest.unwrap_node(self.cell(top).wrapper)
    }

    /// The value [`dequeue`](Self::dequeue) would return.
    pub fn peek_bottom(&self, forest: &Forest) -> Option<NodeId> {
        let top = self.top?;
        let bottom = self.cell(top).above;
        forest.unwrap_node(self.cell(bottom).wrapper)
    }

    /// Drops every wrapper. The values themselves stay alive.
    pub fn clear(&mut self, forest: &mut Forest) {
        while !self.is_empty() {
            self.pop(forest);
        }
        self.cells.clear();
        self.vacant.clear();
    }

    fn unwrap(forest: &mut Forest, cell: Cell) -> Option<NodeId> {
        let value = forest.unwrap_node(cell.wrapper);
        forest.destroy(cell.wrapper, false);
        value
    }

    /// Splices `index` out, keeping `above`/`below` inverse. Clears `top`
    /// when the ring becomes empty.
    fn unlink(&mut self, index: usize) -> Cell {
        let cell = self.cell(index);
        if cell.below == index {
            self.top = None;
        } else {
            self.cell_mut(cell.above).below = cell.below;
            self.cell_mut(cell.below).above = cell.above;
        }
        self.cells[index] = None;
        self.vacant.push(index);
        self.len -= 1;
        cell
    }

    fn cell(&self, index: usize) -> Cell {
        match self.cells[index] {
            Some(cell) => cell,
            None => unreachable!("ring link to vacant cell {index}"),
        }
    }

    fn cell_mut(&mut self, index: usize) -> &mut Cell {
        match self.cells[index].as_mut() {
            Some(cell) => cell,
            None => unreachable!("ring link to vacant cell {index}"),
        }
    }
}
