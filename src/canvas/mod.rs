//! Addressable character-cell canvases.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ TextSurface (owns all cells) │
//! │    ┌───────────────┐         │
//! │    │ TextView      │ ← offset + size, borrows the surface
//! │    │   ┌──────┐    │         │
//! │    │   │ View │    │ ← views of views compose offsets
//! │    │   └──────┘    │         │
//! │    └───────────────┘         │
//! └──────────────────────────────┘
//! ```
//!
//! Every address is validated against the canvas it is made on. Nothing is
//! clamped: an out-of-bounds cell, view, or region is a [`CanvasError`].

mod surface;

pub use surface::TextSurface;

use std::fmt;
use std::ops::Range;

use crate::error::{Axis, CanvasError};
use crate::types::{Cell, Color, TextStyle};

// =============================================================================
// TextCanvas
// =============================================================================

/// Common interface of surfaces and views.
///
/// Implementors only describe where they sit on the owning surface; addressing,
/// writing, and serialization are provided on top of that.
pub trait TextCanvas {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Top-left corner in owning-surface coordinates, as `(row, column)`.
    fn origin(&self) -> (usize, usize);

    fn surface(&self) -> &TextSurface;
    fn surface_mut(&mut self) -> &mut TextSurface;

    /// Cell at `(row, column)` of this canvas.
    fn cell(&self, row: usize, column: usize) -> Result<&Cell, CanvasError> {
        check_index(Axis::Row, row, self.height())?;
        check_index(Axis::Column, column, self.width())?;
        let (top, left) = self.origin();
        Ok(self.surface().raw(top + row, left + column))
    }

    fn cell_mut(&mut self, row: usize, column: usize) -> Result<&mut Cell, CanvasError> {
        check_index(Axis::Row, row, self.height())?;
        check_index(Axis::Column, column, self.width())?;
        let (top, left) = self.origin();
        Ok(self.surface_mut().raw_mut(top + row, left + column))
    }

    /// Rectangular sub-view. Empty ranges are allowed and yield an empty view.
    fn view(&mut self, rows: Range<usize>, columns: Range<usize>) -> Result<TextView<'_>, CanvasError> {
        check_range(Axis::Row, &rows, self.height())?;
        check_range(Axis::Column, &columns, self.width())?;
        let (top, left) = self.origin();
        Ok(TextView {
            surface: self.surface_mut(),
            top: top + rows.start,
            left: left + columns.start,
            width: columns.len(),
            height: rows.len(),
        })
    }

    /// Zero-sized view anchored at this canvas's origin.
    fn empty(&mut self) -> TextView<'_> {
        let (top, left) = self.origin();
        TextView {
            surface: self.surface_mut(),
            top,
            left,
            width: 0,
            height: 0,
        }
    }

    /// Place each `char` of `text` in consecutive cells starting at `(row, column)`.
    ///
    /// Only attributes that are `Some` overwrite the touched cells. No wrapping:
    /// text running past the row end fails before any cell is changed.
    fn write(
        &mut self,
        row: usize,
        column: usize,
        text: &str,
        fg: Option<Color>,
        bg: Option<Color>,
        style: Option<TextStyle>,
    ) -> Result<(), CanvasError> {
        let units = text.chars().count();
        if units == 0 {
            return Ok(());
        }
        check_index(Axis::Row, row, self.height())?;
        check_index(Axis::Column, column, self.width())?;
        check_index(Axis::Column, column + units - 1, self.width())?;

        for (offset, unit) in text.chars().enumerate() {
            let cell = self.cell_mut(row, column + offset)?;
            cell.text.clear();
            cell.text.push(unit);
            if let Some(fg) = fg {
                cell.fg = Some(fg);
            }
            if let Some(bg) = bg {
                cell.bg = Some(bg);
            }
            if let Some(style) = style {
                cell.style = style;
            }
        }
        Ok(())
    }

    /// Apply `body` to every cell, row-major.
    fn fill<F>(&mut self, mut body: F)
    where
        F: FnMut(&mut Cell),
        Self: Sized,
    {
        let (top, left) = self.origin();
        let (width, height) = (self.width(), self.height());
        let surface = self.surface_mut();
        for row in top..top + height {
            for column in left..left + width {
                body(surface.raw_mut(row, column));
            }
        }
    }

    /// Append the ANSI serialization of a region of this canvas to `out`.
    fn render_into(&self, out: &mut String, rows: Range<usize>, columns: Range<usize>) -> Result<(), CanvasError> {
        check_range(Axis::Row, &rows, self.height())?;
        check_range(Axis::Column, &columns, self.width())?;
        let (top, left) = self.origin();
        self.surface().serialize(
            out,
            top + rows.start..top + rows.end,
            left + columns.start..left + columns.end,
        );
        Ok(())
    }

    /// ANSI serialization of a region of this canvas.
    fn render_region(&self, rows: Range<usize>, columns: Range<usize>) -> Result<String, CanvasError> {
        let mut out = String::with_capacity(estimate_len(rows.len(), columns.len()));
        self.render_into(&mut out, rows, columns)?;
        Ok(out)
    }

    /// ANSI serialization of the whole canvas.
    fn render(&self) -> String {
        let (width, height) = (self.width(), self.height());
        let (top, left) = self.origin();
        let mut out = String::with_capacity(estimate_len(height, width));
        self.surface().serialize(&mut out, top..top + height, left..left + width);
        out
    }
}

// =============================================================================
// TextView
// =============================================================================

/// A rectangular window into a [`TextSurface`].
///
/// Borrows the surface mutably, so it can never outlive it.
pub struct TextView<'a> {
    surface: &'a mut TextSurface,
    top: usize,
    left: usize,
    width: usize,
    height: usize,
}

impl TextCanvas for TextView<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn origin(&self) -> (usize, usize) {
        (self.top, self.left)
    }

    fn surface(&self) -> &TextSurface {
        &*self.surface
    }

    fn surface_mut(&mut self) -> &mut TextSurface {
        &mut *self.surface
    }
}

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextView")
            .field("top", &self.top)
            .field("left", &self.left)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

// =============================================================================
// Bounds Checks
// =============================================================================

#[inline]
fn check_index(axis: Axis, value: usize, bound: usize) -> Result<(), CanvasError> {
    if value < bound {
        Ok(())
    } else {
        Err(CanvasError::OutOfRange { axis, value, bound })
    }
}

/// Non-empty ranges must have both their first and last index in bounds.
/// Empty ranges only need to start at or before the edge.
fn check_range(axis: Axis, range: &Range<usize>, bound: usize) -> Result<(), CanvasError> {
    if range.start > range.end {
        return Err(CanvasError::InvalidRange {
            axis,
            start: range.start,
            end: range.end,
        });
    }
    if range.is_empty() {
        if range.start > bound {
            return Err(CanvasError::OutOfRange {
                axis,
                value: range.start,
                bound,
            });
        }
        return Ok(());
    }
    check_index(axis, range.start, bound)?;
    check_index(axis, range.end - 1, bound)
}

/// Cells plus newlines, doubled for escape sequences.
#[inline]
fn estimate_len(rows: usize, columns: usize) -> usize {
    (rows * columns + rows) * 2
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_bounds() {
        let surface = TextSurface::new(3, 2);
        assert!(surface.cell(0, 0).is_ok());
        assert!(surface.cell(1, 2).is_ok());
        assert_eq!(
            surface.cell(2, 0),
            Err(CanvasError::OutOfRange {
                axis: Axis::Row,
                value: 2,
                bound: 2
            })
        );
        assert_eq!(
            surface.cell(0, 3),
            Err(CanvasError::OutOfRange {
                axis: Axis::Column,
                value: 3,
                bound: 3
            })
        );
    }

    #[test]
    fn test_view_translates_addresses() {
        let mut surface = TextSurface::new(5, 4);
        {
            let mut view = surface.view(1..3, 2..5).unwrap();
            assert_eq!((view.width(), view.height()), (3, 2));
            view.cell_mut(0, 0).unwrap().text = "x".into();
            assert!(view.cell(2, 0).is_err());
            assert!(view.cell(0, 3).is_err());
        }
        assert_eq!(surface.cell(1, 2).unwrap().text, "x");
    }

    #[test]
    fn test_nested_views_compose() {
        let mut surface = TextSurface::new(6, 6);
        {
            let mut outer = surface.view(1..6, 1..6).unwrap();
            let mut inner = outer.view(2..4, 3..5).unwrap();
            assert_eq!(inner.origin(), (3, 4));
            inner.write(1, 1, "z", None, None, None).unwrap();
        }
        assert_eq!(surface.cell(4, 5).unwrap().text, "z");
    }

    #[test]
    fn test_view_bounds() {
        let mut surface = TextSurface::new(4, 3);
        assert!(surface.view(0..3, 0..4).is_ok());
        assert!(surface.view(0..4, 0..4).is_err());
        assert!(surface.view(3..3, 0..4).is_ok());
        assert!(surface.view(4..4, 0..4).is_err());
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = surface.view(2..1, 0..1);
        assert!(matches!(reversed, Err(CanvasError::InvalidRange { .. })));
    }

    #[test]
    fn test_empty_view_is_addressable_empty() {
        let mut surface = TextSurface::new(4, 3);
        let mut empty = surface.view(0..0, 0..4).unwrap();
        assert_eq!(empty.height(), 0);
        assert!(empty.cell(0, 0).is_err());
        assert_eq!(empty.render(), "");
        let nothing = empty.empty();
        assert_eq!((nothing.width(), nothing.height()), (0, 0));
    }

    #[test]
    fn test_write_places_one_cell_per_char() {
        let mut surface = TextSurface::new(5, 1);
        surface.write(0, 0, "ab", Some(Color::RED), None, None).unwrap();
        assert_eq!(surface.cell(0, 0).unwrap().text, "a");
        assert_eq!(surface.cell(0, 1).unwrap().text, "b");
        assert_eq!(surface.cell(0, 1).unwrap().fg, Some(Color::RED));
        for column in 2..5 {
            assert_eq!(surface.cell(0, column).unwrap(), &Cell::BLANK);
        }
    }

    #[test]
    fn test_write_astral_char_is_one_unit() {
        let mut surface = TextSurface::new(3, 1);
        surface.write(0, 0, "a😀b", None, None, None).unwrap();
        assert_eq!(surface.cell(0, 1).unwrap().text, "😀");
        assert_eq!(surface.cell(0, 2).unwrap().text, "b");
    }

    #[test]
    fn test_write_keeps_absent_attributes() {
        let mut surface = TextSurface::new(2, 1);
        surface
            .write(0, 0, "ab", Some(Color::BLUE), Some(Color::WHITE), Some(TextStyle::BOLD))
            .unwrap();
        surface.write(0, 0, "c", None, None, None).unwrap();
        let cell = surface.cell(0, 0).unwrap();
        assert_eq!(cell.text, "c");
        assert_eq!(cell.fg, Some(Color::BLUE));
        assert_eq!(cell.bg, Some(Color::WHITE));
        assert_eq!(cell.style, TextStyle::BOLD);
    }

    #[test]
    fn test_write_past_row_end_changes_nothing() {
        let mut surface = TextSurface::new(3, 1);
        let err = surface.write(0, 1, "abc", None, None, None);
        assert!(matches!(err, Err(CanvasError::OutOfRange { axis: Axis::Column, .. })));
        assert_eq!(surface.render(), "   ");
    }

    #[test]
    fn test_fill_visits_view_only() {
        let mut surface = TextSurface::new(3, 3);
        {
            let mut view = surface.view(1..2, 0..3).unwrap();
            view.fill(|cell| cell.text = "-".into());
        }
        assert_eq!(surface.render(), "   \n---\n   ");
    }

    #[test]
    fn test_render_region_bounds() {
        let surface = TextSurface::new(2, 2);
        assert!(surface.render_region(0..2, 0..2).is_ok());
        assert!(surface.render_region(0..3, 0..2).is_err());
    }
}
