//! Built-in node kinds.
//!
//! - [`text`] - styled multi-line leaf
//! - [`row`] / [`column`] - stacking containers
//! - [`static_items`] - print-once output above the live frame
//!
//! Anything else plugs into [`LayoutNode`](crate::engine::LayoutNode) through
//! the `Custom` policy variants.

mod stack;
mod static_items;
mod text;

pub use stack::{Direction, Stack, column, row};
pub use static_items::{StaticItems, static_items};
pub use text::{Text, text};
