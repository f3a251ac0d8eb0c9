//! Renderers - turn a layout tree into the text for one output.
//!
//! - [`AnsiRendering`] repaints the live frame in place with cursor movement
//! - [`DebugRendering`] dumps everything, every time, for logs and tests
//!
//! Both reuse an internal buffer; the returned `&str` borrows it until the
//! next call.

pub mod ansi;
mod debug;
mod inline;

pub use debug::DebugRendering;
pub use inline::AnsiRendering;

use crate::engine::LayoutNode;
use crate::error::Result;

/// Produces the text for one output from the current tree.
pub trait Rendering: Send {
    /// Draw `node` (and its statics) and serialize the result.
    fn render(&mut self, node: &mut LayoutNode) -> Result<&str>;
}

/// One-shot serialization of a tree, statics included, as a fresh terminal
/// would show it.
pub fn render_to_string(node: &mut LayoutNode) -> Result<String> {
    AnsiRendering::new().render(node).map(str::to_owned)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{row, text};
    use crate::types::{Color, TextStyle};

    #[test]
    fn test_render_to_string() {
        let mut root = LayoutNode::root().with_children([row([
            text("Hi").fg(Color::RED).style(TextStyle::BOLD).into(),
            text("!").into(),
        ])]);
        assert_eq!(render_to_string(&mut root).unwrap(), "\x1b[31;1mHi\x1b[39;22m!\n");
    }

    #[test]
    fn test_renderers_are_interchangeable() {
        let mut renderers: Vec<Box<dyn Rendering>> =
            vec![Box::new(AnsiRendering::new()), Box::new(DebugRendering::new())];
        let mut root = LayoutNode::root().with_children([text("ok").into()]);
        for renderer in &mut renderers {
            assert!(renderer.render(&mut root).unwrap().contains("ok"));
        }
    }
}
