//! Row and column containers.
//!
//! ```text
//! column:  ┌────┐      row:  ┌──┬────┬─┐
//!          ├──┬─┘            └──┴────┴─┘
//!          ├──┘
//!          └───
//! ```
//!
//! Children keep their natural size; the container only decides offsets.

use std::fmt::Write as _;

use crate::engine::{
    DebugPolicy, DrawPolicy, LayoutNode, Measure, MeasurePolicy, Measured, Position, RenderDebug, Size, StaticPolicy,
};

/// Main axis of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Row,
    Column,
}

/// Layout policy shared by [`row`] and [`column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stack {
    direction: Direction,
}

/// Children side by side, left to right.
pub fn row(children: impl IntoIterator<Item = LayoutNode>) -> LayoutNode {
    stack(Direction::Row, children)
}

/// Children top to bottom.
pub fn column(children: impl IntoIterator<Item = LayoutNode>) -> LayoutNode {
    stack(Direction::Column, children)
}

fn stack(direction: Direction, children: impl IntoIterator<Item = LayoutNode>) -> LayoutNode {
    let stack = Stack { direction };
    LayoutNode::new(
        MeasurePolicy::custom(stack),
        DrawPolicy::Children,
        StaticPolicy::Children,
        DebugPolicy::custom(stack),
    )
    .with_children(children)
}

impl Measure for Stack {
    fn measure(&self, children: &[Size]) -> Measured {
        let mut placements = Vec::with_capacity(children.len());
        let mut size = Size::ZERO;
        for child in children {
            match self.direction {
                Direction::Row => {
                    placements.push(Position::new(size.width, 0));
                    size.width += child.width;
                    size.height = size.height.max(child.height);
                }
                Direction::Column => {
                    placements.push(Position::new(0, size.height));
                    size.height += child.height;
                    size.width = size.width.max(child.width);
                }
            }
        }
        Measured::new(size, placements)
    }
}

impl RenderDebug for Stack {
    fn render_debug(&self, node: &LayoutNode) -> String {
        let name = match self.direction {
            Direction::Row => "Row",
            Direction::Column => "Column",
        };
        debug_container(name, node)
    }
}

/// `Name(x=.., y=.., w=.., h=..)` followed by every child indented two spaces.
pub(crate) fn debug_container(name: &str, node: &LayoutNode) -> String {
    let mut out = format!(
        "{name}(x={}, y={}, w={}, h={})",
        node.x(),
        node.y(),
        node.width(),
        node.height()
    );
    for child in node.children() {
        for line in child.to_string().lines() {
            let _ = write!(out, "\n  {line}");
        }
    }
    out
}

// =============================================================================
// Tests
// =============================================================================
