//! Print-once output.
//!
//! A static node takes no space in the live frame. Each of its children is
//! drawn into its own surface, at the size the frame's layout pass measured,
//! and handed to the renderer as a static canvas, which the incremental
//! renderer prints above the frame and never redraws.

use crate::canvas::{TextSurface, TextView};
use crate::engine::{
    DebugPolicy, Draw, DrawPolicy, DrawStatics, LayoutNode, Measure, MeasurePolicy, Measured, RenderDebug, Size,
    StaticPolicy,
};
use crate::error::CanvasError;

use super::stack::debug_container;

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticItems;

/// Children emitted once each, in order, as static canvases.
pub fn static_items(children: impl IntoIterator<Item = LayoutNode>) -> LayoutNode {
    LayoutNode::new(
        MeasurePolicy::custom(StaticItems),
        DrawPolicy::custom(StaticItems),
        StaticPolicy::custom(StaticItems),
        DebugPolicy::custom(StaticItems),
    )
    .with_children(children)
}

impl Measure for StaticItems {
    fn measure(&self, _children: &[Size]) -> Measured {
        Measured::leaf(Size::ZERO)
    }
}

impl Draw for StaticItems {
    fn draw(&self, _canvas: &mut TextView<'_>) -> Result<(), CanvasError> {
        Ok(())
    }
}

impl DrawStatics for StaticItems {
    fn draw_statics(&self, children: &mut [LayoutNode]) -> Result<Vec<TextSurface>, CanvasError> {
        children.iter().map(LayoutNode::draw_laid_out).collect()
    }
}

impl RenderDebug for StaticItems {
    fn render_debug(&self, node: &LayoutNode) -> String {
        debug_container("Static", node)
    }
}

// =============================================================================
// Tests
// =============================================================================
