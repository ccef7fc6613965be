//! Payload kinds shipped with the crate.
//!
//! | Kind | Value | Ordering | Rendering |
//! |------|-------|----------|-----------|
//! | [`TextKind`] | `String` | length, then bytes | the text itself |
//! | [`IntKind`] | `i64` | numeric | decimal |
//! | [`NodeKind`] | [`NodeId`](crate::NodeId) | delegates to the wrapped nodes | none |

mod int;
mod node;
mod text;

pub use int::IntKind;
pub use node::NodeKind;
pub use text::TextKind;

pub static TEXT: TextKind = TextKind;
pub static INT: IntKind = IntKind;
pub static NODE: NodeKind = NodeKind;
