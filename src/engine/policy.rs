//! Per-node behavior.
//!
//! Each node carries four policies. Every policy is a closed enum whose
//! built-in variants cover the default behaviors (`Children`, `None`, `Overlay`);
//! node kinds with their own behavior plug in through the `Custom` variant and
//! one of the capability traits below.
//!
//! `Unassigned` exists only so a node can be created before its content system
//! fills it in. Any operation that reaches an `Unassigned` policy panics.

use std::fmt;
use std::sync::Arc;

use super::LayoutNode;
use crate::canvas::{TextSurface, TextView};
use crate::error::CanvasError;

// =============================================================================
// Measurement Results
// =============================================================================

/// Natural size of a measured node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    pub const ZERO: Size = Size { width: 0, height: 0 };

    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Offset of a child inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Outcome of measuring one node: its own size, plus where each child goes once
/// the node itself is placed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Measured {
    pub size: Size,
    /// Child offsets, by child index. Children without an entry go to the origin.
    pub placements: Vec<Position>,
}

impl Measured {
    pub fn new(size: Size, placements: Vec<Position>) -> Self {
        Self { size, placements }
    }

    /// A node with no children to place.
    pub fn leaf(size: Size) -> Self {
        Self {
            size,
            placements: Vec::new(),
        }
    }
}

// =============================================================================
// Capability Traits
// =============================================================================

/// Computes a node's natural size from its children's natural sizes.
///
/// Measurement is unconstrained: nothing flows down from the parent.
pub trait Measure: Send + Sync {
    fn measure(&self, children: &[Size]) -> Measured;
}

/// Draws a node directly into the region it was given.
pub trait Draw: Send + Sync {
    fn draw(&self, canvas: &mut TextView<'_>) -> Result<(), CanvasError>;
}

/// Produces print-once canvases for a node.
pub trait DrawStatics: Send + Sync {
    fn draw_statics(&self, children: &mut [LayoutNode]) -> Result<Vec<TextSurface>, CanvasError>;
}

/// Human-readable description of a node (and usually its subtree).
pub trait RenderDebug: Send + Sync {
    fn render_debug(&self, node: &LayoutNode) -> String;
}

// =============================================================================
// Policies
// =============================================================================

#[derive(Clone, Default)]
pub enum MeasurePolicy {
    #[default]
    Unassigned,
    /// Size is the max child width by max child height; every child at the origin.
    Overlay,
    Custom(Arc<dyn Measure>),
}

#[derive(Clone, Default)]
pub enum DrawPolicy {
    #[default]
    Unassigned,
    /// Draw each non-empty child into the sub-view at its position.
    Children,
    Custom(Arc<dyn Draw>),
}

#[derive(Clone, Default)]
pub enum StaticPolicy {
    #[default]
    Unassigned,
    /// Contributes nothing.
    None,
    /// Concatenation of the children's contributions, in child order.
    Children,
    Custom(Arc<dyn DrawStatics>),
}

#[derive(Clone, Default)]
pub enum DebugPolicy {
    #[default]
    Unassigned,
    /// Children's debug forms joined by newlines.
    Children,
    Custom(Arc<dyn RenderDebug>),
}

impl MeasurePolicy {
    pub fn custom(policy: impl Measure + 'static) -> Self {
        Self::Custom(Arc::new(policy))
    }
}

impl DrawPolicy {
    pub fn custom(policy: impl Draw + 'static) -> Self {
        Self::Custom(Arc::new(policy))
    }
}

impl StaticPolicy {
    pub fn custom(policy: impl DrawStatics + 'static) -> Self {
        Self::Custom(Arc::new(policy))
    }
}

impl DebugPolicy {
    pub fn custom(policy: impl RenderDebug + 'static) -> Self {
        Self::Custom(Arc::new(policy))
    }
}

/// Overlay measurement used by the root.
pub(crate) fn measure_overlay(children: &[Size]) -> Measured {
    let size = children.iter().fold(Size::ZERO, |acc, child| Size {
        width: acc.width.max(child.width),
        height: acc.height.max(child.height),
    });
    Measured::new(size, vec![Position::ORIGIN; children.len()])
}

macro_rules! policy_debug {
    ($policy:ident { $($variant:ident),* }) => {
        impl fmt::Debug for $policy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant => f.write_str(stringify!($variant)),)*
                    Self::Custom(_) => f.write_str("Custom"),
                }
            }
        }
    };
}

policy_debug!(MeasurePolicy { Unassigned, Overlay });
policy_debug!(DrawPolicy { Unassigned, Children });
policy_debug!(StaticPolicy { Unassigned, None, Children });
policy_debug!(DebugPolicy { Unassigned, Children });

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_takes_max_of_each_axis() {
        let measured = measure_overlay(&[Size::new(3, 2), Size::new(5, 1)]);
        assert_eq!(measured.size, Size::new(5, 2));
        assert_eq!(measured.placements, vec![Position::ORIGIN, Position::ORIGIN]);
    }

    #[test]
    fn test_overlay_of_nothing_is_empty() {
        let measured = measure_overlay(&[]);
        assert_eq!(measured.size, Size::ZERO);
        assert!(measured.placements.is_empty());
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::new(0, 3).is_empty());
        assert!(Size::new(3, 0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    #[test]
    fn test_policy_debug_names() {
        assert_eq!(format!("{:?}", StaticPolicy::None), "None");
        assert_eq!(format!("{:?}", DrawPolicy::default()), "Unassigned");
    }
}
