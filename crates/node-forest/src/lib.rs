//! Type-erased, single-ownership node graphs.
//!
//! A [`Forest`] is an arena of nodes. Each node carries a payload whose
//! behaviour (teardown, ordering, rendering) comes from a shared
//! [`Contract`], and an index-addressable table of child nodes. A child has
//! at most one owner at a time; moving it always detaches it first.
//!
//! On top of that engine:
//! - [`tree`] keeps an unbalanced binary search tree in slots 0 and 1,
//! - [`ring`] provides a stack/queue over a circular doubly-linked ring.
//!
//! ```
//! use node_forest::{tree, Forest, Order};
//!
//! let mut forest = Forest::new();
//! let root = forest.int(5).unwrap();
//! for n in [3, 8, 1] {
//!     let node = forest.int(n).unwrap();
//!     tree::insert(&mut forest, root, node).unwrap();
//! }
//! let sorted: Vec<i64> = tree::collect(&forest, root, Order::In)
//!     .into_iter()
//!     .map(|id| *forest.payload::<node_forest::IntKind>(id).unwrap())
//!     .collect();
//! assert_eq!(sorted, vec![1, 3, 5, 8]);
//! ```
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`contract`] | [`Contract`] and [`PayloadKind`] |
//! | [`kinds`] | [`TextKind`], [`IntKind`], [`NodeKind`] |
//! | [`forest`] | [`Forest`]: lifecycle, adoption, emancipation |
//! | [`tree`] | BST insert, find, traversal |
//! | [`ring`] | [`Ring`] stack/queue |
//! | [`selftest`] | scenarios behind the `node-selftest` binary |

pub mod contract;
pub mod error;
pub mod forest;
pub mod kinds;
pub mod ring;
pub mod selftest;
pub mod tree;
pub mod types;

pub use contract::{Contract, Payload, PayloadKind};
pub use error::NodeError;
pub use forest::Forest;
pub use kinds::{IntKind, NodeKind, TextKind, INT, NODE, TEXT};
pub use ring::Ring;
pub use types::{NodeId, Order};
