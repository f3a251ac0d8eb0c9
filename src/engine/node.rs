//! LayoutNode - one element of the render tree.
//!
//! Every frame runs the same three passes over the tree:
//!
//! ```text
//! measure()  bottom-up: children first, then the node's MeasurePolicy
//! place()    top-down:  record the offset, then place children at the
//!                       offsets the measurement produced
//! draw_to()  top-down:  DrawPolicy, or each child into its own sub-view
//! ```
//!
//! Positions are relative to the parent, which is exactly what the default
//! draw pass needs to cut the child's sub-view out of the parent's canvas.

use std::fmt;

use super::policy::{
    DebugPolicy, DrawPolicy, MeasurePolicy, Measured, Position, Size, StaticPolicy, measure_overlay,
};
use crate::canvas::{TextCanvas, TextSurface, TextView};
use crate::error::{CanvasError, EditError};

#[track_caller]
fn unassigned(policy: &str) -> ! {
    panic!("layout node {policy} policy was never assigned")
}

/// A node of the layout tree.
///
/// Owns its children. Structure changes only through [`insert_child`],
/// [`remove_children`], and [`move_children`], which the content system drives.
///
/// [`insert_child`]: LayoutNode::insert_child
/// [`remove_children`]: LayoutNode::remove_children
/// [`move_children`]: LayoutNode::move_children
#[derive(Default)]
pub struct LayoutNode {
    pub measure_policy: MeasurePolicy,
    pub draw_policy: DrawPolicy,
    pub static_policy: StaticPolicy,
    pub debug_policy: DebugPolicy,
    children: Vec<LayoutNode>,

    // Valid after measure() / place().
    size: Size,
    position: Position,
    placements: Option<Vec<Position>>,
}

impl LayoutNode {
    pub fn new(
        measure_policy: MeasurePolicy,
        draw_policy: DrawPolicy,
        static_policy: StaticPolicy,
        debug_policy: DebugPolicy,
    ) -> Self {
        Self {
            measure_policy,
            draw_policy,
            static_policy,
            debug_policy,
            ..Self::default()
        }
    }

    /// A node with no policies yet. Using it before assigning them panics.
    pub fn unassigned() -> Self {
        Self::default()
    }

    /// The synthetic top of the tree: children are overlaid at the origin.
    pub fn root() -> Self {
        Self::new(
            MeasurePolicy::Overlay,
            DrawPolicy::Children,
            StaticPolicy::Children,
            DebugPolicy::Children,
        )
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = LayoutNode>) -> Self {
        self.children.extend(children);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn children(&self) -> &[LayoutNode] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&LayoutNode> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut LayoutNode> {
        self.children.get_mut(index)
    }

    pub fn width(&self) -> usize {
        self.size.width
    }

    pub fn height(&self) -> usize {
        self.size.height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Offset inside the parent, from the last `place`.
    pub fn x(&self) -> usize {
        self.position.x
    }

    pub fn y(&self) -> usize {
        self.position.y
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Follow child indices from this node.
    pub fn descendant_mut(&mut self, path: &[usize]) -> Result<&mut LayoutNode, EditError> {
        let mut node = self;
        for (depth, &index) in path.iter().enumerate() {
            node = node
                .children
                .get_mut(index)
                .ok_or_else(|| EditError::NoSuchNode(path[..=depth].to_vec()))?;
        }
        Ok(node)
    }

    // =========================================================================
    // Measure / Place / Draw
    // =========================================================================

    /// Measure children, then this node. Returns this node's natural size.
    pub fn measure(&mut self) -> Size {
        let sizes: Vec<Size> = self.children.iter_mut().map(LayoutNode::measure).collect();
        let Measured { size, placements } = match &self.measure_policy {
            MeasurePolicy::Overlay => measure_overlay(&sizes),
            MeasurePolicy::Custom(policy) => policy.measure(&sizes),
            MeasurePolicy::Unassigned => unassigned("measure"),
        };
        self.size = size;
        self.placements = Some(placements);
        size
    }

    /// Record this node's offset and place every child where measurement put it.
    pub fn place(&mut self, x: usize, y: usize) {
        let Some(placements) = self.placements.take() else {
            panic!("layout node placed before it was measured");
        };
        self.position = Position::new(x, y);
        for (index, child) in self.children.iter_mut().enumerate() {
            let at = placements.get(index).copied().unwrap_or_default();
            child.place(at.x, at.y);
        }
    }

    /// Draw this node into `canvas`, which covers exactly its placed region.
    pub fn draw_to(&self, canvas: &mut TextView<'_>) -> Result<(), CanvasError> {
        match &self.draw_policy {
            DrawPolicy::Custom(policy) => policy.draw(canvas),
            DrawPolicy::Children => {
                for child in &self.children {
                    if child.size.is_empty() {
                        continue;
                    }
                    let Position { x, y } = child.position;
                    let mut region = canvas.view(y..y + child.height(), x..x + child.width())?;
                    child.draw_to(&mut region)?;
                }
                Ok(())
            }
            DrawPolicy::Unassigned => unassigned("draw"),
        }
    }

    /// Measure, place at the origin, and draw into a freshly allocated surface.
    pub fn draw(&mut self) -> Result<TextSurface, CanvasError> {
        let size = self.measure();
        self.place(0, 0);
        let mut surface = TextSurface::new(size.width, size.height);
        {
            let mut canvas = surface.view(0..size.height, 0..size.width)?;
            self.draw_to(&mut canvas)?;
        }
        Ok(surface)
    }

    /// Draw into a fresh surface using the layout from the last measure and
    /// place pass.
    pub fn draw_laid_out(&self) -> Result<TextSurface, CanvasError> {
        let mut surface = TextSurface::new(self.size.width, self.size.height);
        {
            let mut canvas = surface.view(0..self.size.height, 0..self.size.width)?;
            self.draw_to(&mut canvas)?;
        }
        Ok(surface)
    }

    /// Print-once canvases contributed by this subtree, in tree order.
    pub fn draw_statics(&mut self) -> Result<Vec<TextSurface>, CanvasError> {
        match &self.static_policy {
            StaticPolicy::None => Ok(Vec::new()),
            StaticPolicy::Children => {
                let mut statics = Vec::new();
                for child in &mut self.children {
                    let child_statics = child.draw_statics()?;
                    if child_statics.is_empty() {
                        continue;
                    }
                    if statics.is_empty() {
                        statics = child_statics;
                    } else {
                        statics.extend(child_statics);
                    }
                }
                Ok(statics)
            }
            StaticPolicy::Custom(policy) => policy.draw_statics(&mut self.children),
            StaticPolicy::Unassigned => unassigned("static"),
        }
    }

    // =========================================================================
    // Tree Edits
    // =========================================================================

    /// Insert `node` so it ends up at `index`. `index == len` appends.
    pub fn insert_child(&mut self, index: usize, node: LayoutNode) -> Result<(), EditError> {
        let len = self.children.len();
        if index > len {
            return Err(EditError::IndexOutOfRange { index, count: 1, len });
        }
        self.children.insert(index, node);
        Ok(())
    }

    /// Remove `count` children starting at `index`, returning them in order.
    pub fn remove_children(&mut self, index: usize, count: usize) -> Result<Vec<LayoutNode>, EditError> {
        let len = self.children.len();
        if index.checked_add(count).is_none_or(|end| end > len) {
            return Err(EditError::IndexOutOfRange { index, count, len });
        }
        Ok(self.children.drain(index..index + count).collect())
    }

    /// Move `count` children starting at `from` so they sit before the child
    /// currently at `to` (`to == len` moves them to the end).
    pub fn move_children(&mut self, from: usize, to: usize, count: usize) -> Result<(), EditError> {
        let len = self.children.len();
        if from.checked_add(count).is_none_or(|end| end > len) {
            return Err(EditError::IndexOutOfRange { index: from, count, len });
        }
        if to > len {
            return Err(EditError::IndexOutOfRange { index: to, count: 0, len });
        }
        if to > from && to < from + count {
            return Err(EditError::InvalidMove { from, to, count });
        }
        if count == 0 || to == from || to == from + count {
            return Ok(());
        }

        let moved: Vec<LayoutNode> = self.children.drain(from..from + count).collect();
        let destination = if from > to { to } else { to - count };
        self.children.splice(destination..destination, moved);
        Ok(())
    }
}

impl fmt::Display for LayoutNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.debug_policy {
            DebugPolicy::Custom(policy) => f.write_str(&policy.render_debug(self)),
            DebugPolicy::Children => {
                for (index, child) in self.children.iter().enumerate() {
                    if index > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{child}")?;
                }
                Ok(())
            }
            DebugPolicy::Unassigned => unassigned("debug"),
        }
    }
}

impl fmt::Debug for LayoutNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutNode")
            .field("measure_policy", &self.measure_policy)
            .field("draw_policy", &self.draw_policy)
            .field("static_policy", &self.static_policy)
            .field("debug_policy", &self.debug_policy)
            .field("size", &self.size)
            .field("position", &self.position)
            .field("children", &self.children)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::policy::{Draw, DrawStatics, Measure, RenderDebug};
    use crate::types::Color;

    /// Fixed-size leaf that fills itself with one character.
    struct Block {
        size: Size,
        fill: &'static str,
    }

    impl Measure for Block {
        fn measure(&self, _children: &[Size]) -> Measured {
            Measured::leaf(self.size)
        }
    }

    impl Draw for Block {
        fn draw(&self, canvas: &mut TextView<'_>) -> Result<(), CanvasError> {
            let fill = self.fill;
            canvas.fill(|cell| cell.text = fill.into());
            Ok(())
        }
    }

    impl RenderDebug for Block {
        fn render_debug(&self, node: &LayoutNode) -> String {
            format!("Block({}x{})", node.width(), node.height())
        }
    }

    struct OneStatic;

    impl DrawStatics for OneStatic {
        fn draw_statics(&self, _children: &mut [LayoutNode]) -> Result<Vec<TextSurface>, CanvasError> {
            let mut surface = TextSurface::new(1, 1);
            surface.write(0, 0, "s", Some(Color::GREEN), None, None)?;
            Ok(vec![surface])
        }
    }

    fn block(width: usize, height: usize, fill: &'static str) -> LayoutNode {
        let block = std::sync::Arc::new(Block {
            size: Size::new(width, height),
            fill,
        });
        LayoutNode::new(
            MeasurePolicy::Custom(block.clone()),
            DrawPolicy::Custom(block.clone()),
            StaticPolicy::None,
            DebugPolicy::Custom(block),
        )
    }

    #[test]
    fn test_root_overlays_children() {
        let mut root = LayoutNode::root().with_children([block(3, 2, "a"), block(5, 1, "b")]);
        assert_eq!(root.measure(), Size::new(5, 2));
        root.place(0, 0);
        assert_eq!(root.child(0).unwrap().position(), Position::ORIGIN);
        assert_eq!(root.child(1).unwrap().position(), Position::ORIGIN);
    }

    #[test]
    fn test_draw_paints_children_in_order() {
        let mut root = LayoutNode::root().with_children([block(3, 2, "a"), block(5, 1, "b")]);
        let surface = root.draw().unwrap();
        assert_eq!(surface.render(), "bbbbb\naaa  ");
    }

    #[test]
    fn test_zero_sized_children_are_skipped() {
        let mut root = LayoutNode::root().with_children([block(0, 4, "x"), block(2, 1, "y")]);
        let surface = root.draw().unwrap();
        assert_eq!(surface.render(), "yy\n  \n  \n  ");
    }

    #[test]
    fn test_empty_root_draws_empty_surface() {
        let mut root = LayoutNode::root();
        let surface = root.draw().unwrap();
        assert_eq!((surface.width(), surface.height()), (0, 0));
        assert_eq!(surface.render(), "");
    }

    #[test]
    fn test_statics_concatenate_in_child_order() {
        let mut with_static = block(1, 1, "a");
        with_static.static_policy = StaticPolicy::custom(OneStatic);
        let mut root = LayoutNode::root().with_children([
            block(1, 1, "x"),
            with_static,
            LayoutNode::root().with_children([{
                let mut inner = block(1, 1, "b");
                inner.static_policy = StaticPolicy::custom(OneStatic);
                inner
            }]),
        ]);
        let statics = root.draw_statics().unwrap();
        assert_eq!(statics.len(), 2);
        assert_eq!(statics[0].render(), "\x1b[32ms\x1b[0m");
    }

    #[test]
    fn test_statics_default_to_empty() {
        let mut root = LayoutNode::root().with_children([block(1, 1, "x")]);
        let statics = root.draw_statics().unwrap();
        assert!(statics.is_empty());
        assert_eq!(statics.capacity(), 0);
    }

    #[test]
    fn test_debug_joins_children() {
        let mut root = LayoutNode::root().with_children([block(3, 2, "a"), block(5, 1, "b")]);
        root.measure();
        assert_eq!(root.to_string(), "Block(3x2)\nBlock(5x1)");
    }

    #[test]
    #[should_panic(expected = "measure policy was never assigned")]
    fn test_unassigned_node_panics_on_measure() {
        LayoutNode::unassigned().measure();
    }

    #[test]
    #[should_panic(expected = "debug policy was never assigned")]
    fn test_unassigned_node_panics_on_debug() {
        let _ = LayoutNode::unassigned().to_string();
    }

    #[test]
    #[should_panic(expected = "placed before it was measured")]
    fn test_place_requires_measure() {
        LayoutNode::root().place(0, 0);
    }

    #[test]
    fn test_child_outside_parent_is_out_of_range() {
        struct Offset;
        impl Measure for Offset {
            fn measure(&self, children: &[Size]) -> Measured {
                Measured::new(Size::new(1, 1), vec![Position::new(1, 0); children.len()])
            }
        }
        let mut parent = LayoutNode::new(
            MeasurePolicy::custom(Offset),
            DrawPolicy::Children,
            StaticPolicy::None,
            DebugPolicy::Children,
        )
        .with_children([block(1, 1, "z")]);
        assert!(matches!(parent.draw(), Err(CanvasError::OutOfRange { .. })));
    }

    fn labels(node: &LayoutNode) -> String {
        node.children()
            .iter()
            .map(|child| child.width().to_string())
            .collect()
    }

    fn numbered(count: usize) -> LayoutNode {
        let mut root = LayoutNode::root().with_children((0..count).map(|i| block(i, 1, "n")));
        root.measure();
        root
    }

    #[test]
    fn test_insert_and_remove() {
        let mut root = numbered(3);
        root.insert_child(3, block(9, 1, "n")).unwrap();
        root.measure();
        assert_eq!(labels(&root), "0129");
        assert!(root.insert_child(6, block(1, 1, "n")).is_err());

        let removed = root.remove_children(1, 2).unwrap();
        assert_eq!(removed.len(), 2);
        root.measure();
        assert_eq!(labels(&root), "09");
        assert_eq!(
            root.remove_children(1, 2).unwrap_err(),
            EditError::IndexOutOfRange { index: 1, count: 2, len: 2 }
        );
    }

    #[test]
    fn test_move_forward_and_back() {
        let mut root = numbered(5);
        root.move_children(0, 3, 2).unwrap();
        root.measure();
        assert_eq!(labels(&root), "20134");

        let mut root = numbered(5);
        root.move_children(3, 1, 2).unwrap();
        root.measure();
        assert_eq!(labels(&root), "03412");

        let mut root = numbered(5);
        root.move_children(1, 5, 1).unwrap();
        root.measure();
        assert_eq!(labels(&root), "02341");
    }

    #[test]
    fn test_move_rejects_bad_ranges() {
        let mut root = numbered(4);
        assert!(matches!(root.move_children(3, 0, 2), Err(EditError::IndexOutOfRange { .. })));
        assert!(matches!(root.move_children(0, 5, 1), Err(EditError::IndexOutOfRange { .. })));
        assert_eq!(
            root.move_children(0, 1, 2),
            Err(EditError::InvalidMove { from: 0, to: 1, count: 2 })
        );
    }

    #[test]
    fn test_descendant_lookup() {
        let mut root = LayoutNode::root().with_children([LayoutNode::root().with_children([block(1, 1, "q")])]);
        assert!(root.descendant_mut(&[0, 0]).is_ok());
        assert_eq!(
            root.descendant_mut(&[0, 1]).unwrap_err(),
            EditError::NoSuchNode(vec![0, 1])
        );
    }
}
