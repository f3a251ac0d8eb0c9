//! The owning canvas and its ANSI serializer.
//!
//! # Serialization
//!
//! Cells are emitted row-major. A "last emitted" cell starts as a blank (space,
//! no color, no style) and is reset to blank at every row boundary, so styling
//! never bleeds across lines. For each cell only the attributes that differ from
//! the last emitted cell produce SGR parameters, and all of them go out in one
//! escape sequence. A row that ends styled gets a full reset before its line
//! break; the region gets one after its last cell.

use std::fmt;
use std::ops::Range;

use super::TextCanvas;
use crate::renderer::ansi::{self, Sgr};
use crate::types::{Cell, TextStyle};

/// The canvas that owns every cell.
///
/// One surface is allocated per drawn frame; views borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSurface {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TextSurface {
    /// Create a surface filled with blank cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    /// Zero-sized view at the origin.
    pub fn empty_view(&mut self) -> super::TextView<'_> {
        self.empty()
    }

    #[inline]
    pub(crate) fn raw(&self, row: usize, column: usize) -> &Cell {
        &self.cells[row * self.width + column]
    }

    #[inline]
    pub(crate) fn raw_mut(&mut self, row: usize, column: usize) -> &mut Cell {
        &mut self.cells[row * self.width + column]
    }

    /// Serialize a region given in surface coordinates. Callers validate bounds.
    pub(crate) fn serialize(&self, out: &mut String, rows: Range<usize>, columns: Range<usize>) {
        // Reused for every cell of the region.
        let mut params: Vec<Sgr> = Vec::with_capacity(8);

        let blank = Cell::BLANK;
        let mut last = &blank;
        for row in rows.clone() {
            if row > rows.start {
                if last.has_attributes() {
                    let _ = ansi::reset(out);
                }
                out.push('\n');
                last = &blank;
            }

            for column in columns.clone() {
                let cell = self.raw(row, column);
                if cell.fg != last.fg {
                    params.push(ansi::fg_param(cell.fg));
                }
                if cell.bg != last.bg {
                    params.push(ansi::bg_param(cell.bg));
                }
                if cell.style != last.style {
                    queue_style_changes(&mut params, last.style, cell.style);
                }
                if !params.is_empty() {
                    // Writing into a String cannot fail.
                    let _ = ansi::sgr(out, &params);
                    params.clear();
                }

                out.push_str(&cell.text);
                last = cell;
            }
        }

        if last.has_attributes() {
            let _ = ansi::reset(out);
        }
    }
}

/// Queue one on/off parameter per flag that changed between `from` and `to`,
/// in [`TextStyle::TOGGLES`] order.
fn queue_style_changes(params: &mut Vec<Sgr>, from: TextStyle, to: TextStyle) {
    for (flag, on, off) in TextStyle::TOGGLES {
        if to.contains(flag) {
            if !from.contains(flag) {
                params.push(Sgr::Code(on));
            }
        } else if from.contains(flag) {
            params.push(Sgr::Code(off));
        }
    }
}

impl TextCanvas for TextSurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn origin(&self) -> (usize, usize) {
        (0, 0)
    }

    fn surface(&self) -> &TextSurface {
        self
    }

    fn surface_mut(&mut self) -> &mut TextSurface {
        self
    }
}

impl fmt::Display for TextSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn styles(from: TextStyle, to: TextStyle) -> String {
        let mut params = Vec::new();
        queue_style_changes(&mut params, from, to);
        let mut out = String::new();
        ansi::sgr(&mut out, &params).unwrap();
        out
    }

    #[test]
    fn test_blank_surface_has_no_escapes() {
        let surface = TextSurface::new(3, 2);
        assert_eq!(surface.render(), "   \n   ");
    }

    #[test]
    fn test_zero_sized_surfaces() {
        assert_eq!(TextSurface::new(0, 0).render(), "");
        assert_eq!(TextSurface::new(4, 0).render(), "");
        assert_eq!(TextSurface::new(0, 3).render(), "\n\n");
    }

    #[test]
    fn test_bold_red_hi() {
        let mut surface = TextSurface::new(2, 1);
        surface
            .write(0, 0, "Hi", Some(Color::RED), None, Some(TextStyle::BOLD))
            .unwrap();
        assert_eq!(surface.render(), "\x1b[31;1mHi\x1b[0m");
        assert_eq!(surface.render(), "\x1b[31;1mHi\x1b[0m");
    }

    #[test]
    fn test_shared_attributes_emit_once() {
        let mut surface = TextSurface::new(4, 1);
        surface
            .write(0, 0, "abcd", Some(Color::GREEN), Some(Color::BLACK), None)
            .unwrap();
        assert_eq!(surface.render(), "\x1b[32;40mabcd\x1b[0m");
    }

    #[test]
    fn test_transition_back_to_default() {
        let mut surface = TextSurface::new(3, 1);
        surface.write(0, 0, "a", Some(Color::RED), Some(Color::BLUE), None).unwrap();
        surface.write(0, 1, "b", None, None, None).unwrap();
        surface.write(0, 2, "c", None, None, None).unwrap();
        assert_eq!(surface.render(), "\x1b[31;44ma\x1b[39;49mbc");
    }

    #[test]
    fn test_styled_row_end_resets_before_newline() {
        let mut surface = TextSurface::new(2, 2);
        surface.write(0, 1, "x", None, None, Some(TextStyle::UNDERLINE)).unwrap();
        surface.write(1, 0, "y", None, None, Some(TextStyle::UNDERLINE)).unwrap();
        assert_eq!(surface.render(), " \x1b[4mx\x1b[0m\n\x1b[4my\x1b[24m ");
    }

    #[test]
    fn test_row_state_does_not_bleed() {
        let mut surface = TextSurface::new(1, 2);
        surface.write(0, 0, "a", Some(Color::CYAN), None, None).unwrap();
        surface.write(1, 0, "b", Some(Color::CYAN), None, None).unwrap();
        assert_eq!(surface.render(), "\x1b[36ma\x1b[0m\n\x1b[36mb\x1b[0m");
    }

    #[test]
    fn test_region_of_surface() {
        let mut surface = TextSurface::new(3, 3);
        surface.write(1, 0, "abc", None, None, None).unwrap();
        surface.write(2, 0, "def", None, None, None).unwrap();
        assert_eq!(surface.render_region(1..3, 1..3).unwrap(), "bc\nef");
    }

    #[test]
    fn test_style_toggles() {
        assert_eq!(styles(TextStyle::NONE, TextStyle::ITALIC | TextStyle::INVERT), "\x1b[3;7m");
        assert_eq!(styles(TextStyle::STRIKETHROUGH, TextStyle::NONE), "\x1b[29m");
        assert_eq!(styles(TextStyle::BOLD, TextStyle::NONE), "\x1b[22m");
        assert_eq!(styles(TextStyle::BOLD, TextStyle::DIM), "\x1b[22;2m");
    }

    #[test]
    fn test_intensity_flags_toggle_independently() {
        assert_eq!(styles(TextStyle::BOLD | TextStyle::DIM, TextStyle::BOLD), "\x1b[22m");
        assert_eq!(styles(TextStyle::DIM, TextStyle::BOLD), "\x1b[1;22m");
        assert_eq!(styles(TextStyle::BOLD | TextStyle::DIM, TextStyle::NONE), "\x1b[22;22m");
    }

    #[test]
    fn test_dim_to_bold_cells() {
        let mut surface = TextSurface::new(2, 1);
        surface.write(0, 0, "a", None, None, Some(TextStyle::DIM)).unwrap();
        surface.write(0, 1, "b", None, None, Some(TextStyle::BOLD)).unwrap();
        assert_eq!(surface.render(), "\x1b[2ma\x1b[1;22mb\x1b[0m");
    }
}
