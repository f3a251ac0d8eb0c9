//! Text primitive - a styled, possibly multi-line leaf.
//!
//! # Example
//!
//! ```
//! use glint_tui::primitives::text;
//! use glint_tui::types::{Color, TextStyle};
//!
//! let node = text("Hi").fg(Color::RED).style(TextStyle::BOLD).into_node();
//! assert_eq!(node.children().len(), 0);
//! ```

use std::sync::Arc;

use crate::canvas::{TextCanvas, TextView};
use crate::engine::{
    DebugPolicy, Draw, DrawPolicy, LayoutNode, Measure, MeasurePolicy, Measured, RenderDebug, Size, StaticPolicy,
};
use crate::error::CanvasError;
use crate::types::{Color, TextStyle};

// =============================================================================
// Text Builder
// =============================================================================

/// Start a text leaf. Lines are split on `'\n'`.
pub fn text(value: impl Into<String>) -> Text {
    Text {
        value: value.into(),
        fg: None,
        bg: None,
        style: None,
    }
}

/// A text leaf under construction. Convert with [`Text::into_node`] or `.into()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    value: String,
    fg: Option<Color>,
    bg: Option<Color>,
    style: Option<TextStyle>,
}

impl Text {
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_node(self) -> LayoutNode {
        let text = Arc::new(self);
        LayoutNode::new(
            MeasurePolicy::Custom(text.clone()),
            DrawPolicy::Custom(text.clone()),
            StaticPolicy::None,
            DebugPolicy::Custom(text),
        )
    }

    fn lines(&self) -> impl Iterator<Item = &str> {
        self.value.split('\n')
    }
}

impl From<Text> for LayoutNode {
    fn from(text: Text) -> Self {
        text.into_node()
    }
}

// =============================================================================
// Policies
// =============================================================================

impl Measure for Text {
    fn measure(&self, _children: &[Size]) -> Measured {
        let (width, height) = self
            .lines()
            .fold((0, 0), |(width, height), line| (width.max(line.chars().count()), height + 1));
        Measured::leaf(Size::new(width, height))
    }
}

impl Draw for Text {
    fn draw(&self, canvas: &mut TextView<'_>) -> Result<(), CanvasError> {
        for (row, line) in self.lines().enumerate() {
            canvas.write(row, 0, line, self.fg, self.bg, self.style)?;
        }
        Ok(())
    }
}

impl RenderDebug for Text {
    fn render_debug(&self, node: &LayoutNode) -> String {
        format!(
            "Text({:?}, x={}, y={}, w={}, h={})",
            self.value,
            node.x(),
            node.y(),
            node.width(),
            node.height()
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measures_longest_line() {
        let mut node = text("ab\nabcd\n").into_node();
        assert_eq!(node.measure(), Size::new(4, 3));
    }

    #[test]
    fn test_measures_chars_not_bytes() {
        let mut node = text("héllo").into_node();
        assert_eq!(node.measure(), Size::new(5, 1));
    }

    #[test]
    fn test_bold_red_hi() {
        let mut node = text("Hi").fg(Color::RED).style(TextStyle::BOLD).into_node();
        let surface = node.draw().unwrap();
        assert_eq!(surface.render(), "\x1b[31;1mHi\x1b[0m");
    }

    #[test]
    fn test_draws_each_line() {
        let mut node = text("a\nbc").into_node();
        let surface = node.draw().unwrap();
        assert_eq!(surface.render(), "a \nbc");
    }

    #[test]
    fn test_debug_form() {
        let mut node: LayoutNode = text("Hi\nyo").into();
        node.draw().unwrap();
        assert_eq!(node.to_string(), r#"Text("Hi\nyo", x=0, y=0, w=2, h=2)"#);
    }

    #[test]
    fn test_contributes_no_statics() {
        let mut node = text("x").into_node();
        assert!(node.draw_statics().unwrap().is_empty());
    }
}
