//! Error types for glint-tui.
//!
//! Invariant violations (a node whose policies were never assigned) are not
//! represented here: they panic.

use thiserror::Error;

/// Which coordinate an addressing error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => f.write_str("Row"),
            Axis::Column => f.write_str("Column"),
        }
    }
}

/// Canvas addressing errors. Never clamped, never wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    /// A cell, view, or region coordinate outside `[0, bound)`.
    #[error("{axis} value out of range [0,{bound}): {value}")]
    OutOfRange {
        axis: Axis,
        value: usize,
        bound: usize,
    },

    /// A range whose start lies after its end.
    #[error("{axis} range is reversed: {start}..{end}")]
    InvalidRange {
        axis: Axis,
        start: usize,
        end: usize,
    },
}

/// Tree edit errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Index or range outside the parent's current child list.
    #[error("child index out of range: {index} (+{count}) with {len} children")]
    IndexOutOfRange {
        index: usize,
        count: usize,
        len: usize,
    },

    /// Destination falls inside the moved range.
    #[error("cannot move {count} children from {from} to {to}")]
    InvalidMove { from: usize, to: usize, count: usize },

    /// A node path that does not resolve in the current tree.
    #[error("no node at path {0:?}")]
    NoSuchNode(Vec<usize>),
}

/// Errors surfaced by render cycles and the scheduler.
#[derive(Debug, Error)]
pub enum Error {
    #[error("canvas error: {0}")]
    Canvas(#[from] CanvasError),

    #[error("edit error: {0}")]
    Edit(#[from] EditError),

    /// The render thread could not be spawned.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The render thread panicked.
    #[error("render thread panicked: {0}")]
    RenderPanicked(String),
}

pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = CanvasError::OutOfRange {
            axis: Axis::Row,
            value: 4,
            bound: 3,
        };
        assert_eq!(err.to_string(), "Row value out of range [0,3): 4");
    }

    #[test]
    fn test_wraps_canvas_error() {
        let err: Error = CanvasError::InvalidRange {
            axis: Axis::Column,
            start: 3,
            end: 1,
        }
        .into();
        assert!(matches!(err, Error::Canvas(_)));
        assert!(err.to_string().contains("Column range is reversed"));
    }

    #[test]
    fn test_wraps_edit_error() {
        let err: Error = EditError::NoSuchNode(vec![0, 2]).into();
        assert_eq!(err.to_string(), "edit error: no node at path [0, 2]");
    }
}
