//! Debug renderer - dumps the node tree, statics, and frame every time.
//!
//! Output is append-only and never moves the cursor, so it is safe to pipe
//! into a file or compare in tests.

use std::fmt::Write as _;
use std::time::Instant;

use super::Rendering;
use crate::engine::LayoutNode;
use crate::error::Result;

const SEPARATOR_WIDTH: usize = 50;

#[derive(Debug, Default)]
pub struct DebugRendering {
    output: String,
    last_render: Option<Instant>,
}

impl DebugRendering {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Rendering for DebugRendering {
    fn render(&mut self, node: &mut LayoutNode) -> Result<&str> {
        let out = &mut self.output;
        out.clear();

        if let Some(last) = self.last_render {
            let _ = writeln!(out, "{} +{:?}", "~".repeat(SEPARATOR_WIDTH), last.elapsed());
        }
        self.last_render = Some(Instant::now());

        let surface = node.draw()?;
        let statics = node.draw_statics()?;

        let _ = writeln!(out, "NODES:\n{node}\n");
        if !statics.is_empty() {
            out.push_str("STATIC:\n");
            for surface in &statics {
                let _ = writeln!(out, "{surface}");
            }
            out.push('\n');
        }
        let _ = writeln!(out, "OUTPUT:\n{surface}");

        Ok(&self.output)
    }
}

// =============================================================================
// Tests
// =============================================================================
