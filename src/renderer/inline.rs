//! Incremental inline renderer.
//!
//! Writes to the normal terminal buffer, below whatever is already there, and
//! keeps scrollback intact. Each frame:
//!
//! 1. Moves the cursor up over the previous frame
//! 2. Prints static lines, then the new frame, clearing the tail of every line
//!    that overwrites an old one
//! 3. Clears old lines the new frame no longer reaches and moves back up
//!
//! Static lines scroll away above the frame and are never counted again.

use tracing::trace;

use super::{Rendering, ansi};
use crate::canvas::TextCanvas;
use crate::engine::LayoutNode;
use crate::error::Result;

/// Inline renderer that only repaints the lines of the live frame.
#[derive(Debug, Default)]
pub struct AnsiRendering {
    output: String,
    previous_height: usize,
}

impl AnsiRendering {
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(100),
            previous_height: 0,
        }
    }

    /// Line count of the last live frame (statics excluded).
    pub fn previous_height(&self) -> usize {
        self.previous_height
    }
}

impl Rendering for AnsiRendering {
    fn render(&mut self, node: &mut LayoutNode) -> Result<&str> {
        let surface = node.draw()?;
        let statics = node.draw_statics()?;

        let out = &mut self.output;
        out.clear();

        let mut stale = self.previous_height;
        // Writing into a String cannot fail.
        let _ = ansi::cursor_up(out, stale);

        let static_text: Vec<String> = statics.iter().map(TextCanvas::render).collect();
        let frame = surface.render();
        let lines: Vec<&str> = frame.split('\n').collect();

        let static_lines = static_text.iter().flat_map(|text| text.split('\n'));
        for line in static_lines.chain(lines.iter().copied()) {
            out.push_str(line);
            if stale > 0 {
                stale -= 1;
                let _ = ansi::erase_to_eol(out);
            }
            out.push('\n');
        }

        for index in 0..stale {
            if index > 0 {
                out.push('\n');
            }
            let _ = ansi::erase_to_eol(out);
        }
        let _ = ansi::cursor_up(out, stale.saturating_sub(1));

        trace!(
            lines = lines.len(),
            statics = statics.len(),
            cleared = stale,
            "inline frame"
        );
        self.previous_height = lines.len();
        Ok(&self.output)
    }
}

// =============================================================================
// Tests
// =============================================================================
