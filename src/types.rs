//! Core types for glint-tui.
//!
//! These types define what a canvas stores and what the serializer understands.
//! Everything above them (layout, renderers, scheduler) only moves them around.

use compact_str::CompactString;

use crate::renderer::ansi::Sgr;

// =============================================================================
// Color
// =============================================================================

/// A concrete terminal color.
///
/// "Terminal default" is not a color: cells express it as `None`, which the
/// serializer maps to the reset parameters 39/49.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// ANSI palette index (0-255).
    ///
    /// - 0-7: Standard colors
    /// - 8-15: Bright colors
    /// - 16-231: 6x6x6 RGB cube
    /// - 232-255: Grayscale
    Ansi(u8),
    /// TrueColor.
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Self = Self::Ansi(0);
    pub const RED: Self = Self::Ansi(1);
    pub const GREEN: Self = Self::Ansi(2);
    pub const YELLOW: Self = Self::Ansi(3);
    pub const BLUE: Self = Self::Ansi(4);
    pub const MAGENTA: Self = Self::Ansi(5);
    pub const CYAN: Self = Self::Ansi(6);
    pub const WHITE: Self = Self::Ansi(7);
    pub const BRIGHT_BLACK: Self = Self::Ansi(8);
    pub const BRIGHT_RED: Self = Self::Ansi(9);
    pub const BRIGHT_GREEN: Self = Self::Ansi(10);
    pub const BRIGHT_YELLOW: Self = Self::Ansi(11);
    pub const BRIGHT_BLUE: Self = Self::Ansi(12);
    pub const BRIGHT_MAGENTA: Self = Self::Ansi(13);
    pub const BRIGHT_CYAN: Self = Self::Ansi(14);
    pub const BRIGHT_WHITE: Self = Self::Ansi(15);

    /// Create a TrueColor value.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }

    /// Create an ANSI palette color.
    pub const fn ansi(index: u8) -> Self {
        Self::Ansi(index)
    }

    /// Create from 0xRRGGBB integer format.
    pub const fn from_rgb_int(value: u32) -> Self {
        Self::Rgb(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (slot, c) in channels.iter_mut().zip(hex.chars()) {
                    let v = c.to_digit(16)? as u8;
                    *slot = v * 17;
                }
                Some(Self::Rgb(channels[0], channels[1], channels[2]))
            }
            6 => {
                let value = u32::from_str_radix(hex, 16).ok()?;
                Some(Self::from_rgb_int(value))
            }
            _ => None,
        }
    }

    /// SGR parameter selecting this color as foreground.
    #[inline]
    pub const fn fg(self) -> Sgr {
        Sgr::Foreground(self)
    }

    /// SGR parameter selecting this color as background.
    #[inline]
    pub const fn bg(self) -> Sgr {
        Sgr::Background(self)
    }
}

// =============================================================================
// Text Style (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Independent text style flags.
    ///
    /// Combine with bitwise OR: `TextStyle::BOLD | TextStyle::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextStyle: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERT = 1 << 4;
        const STRIKETHROUGH = 1 << 5;
    }
}

impl TextStyle {
    /// Every flag with its SGR (on, off) parameter pair, in emission order.
    pub const TOGGLES: [(TextStyle, u8, u8); 6] = [
        (TextStyle::BOLD, 1, 22),
        (TextStyle::DIM, 2, 22),
        (TextStyle::ITALIC, 3, 23),
        (TextStyle::UNDERLINE, 4, 24),
        (TextStyle::INVERT, 7, 27),
        (TextStyle::STRIKETHROUGH, 9, 29),
    ];
}

// =============================================================================
// Cell - One addressable character column
// =============================================================================

/// A single canvas cell.
///
/// Holds exactly one display unit of text plus its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// The glyph occupying this column.
    pub text: CompactString,
    /// Foreground color (`None` = terminal default).
    pub fg: Option<Color>,
    /// Background color (`None` = terminal default).
    pub bg: Option<Color>,
    /// Attribute flags (bold, italic, ...).
    pub style: TextStyle,
}

impl Cell {
    /// A space with no color and no style.
    pub const BLANK: Cell = Cell {
        text: CompactString::const_new(" "),
        fg: None,
        bg: None,
        style: TextStyle::NONE,
    };

    pub fn new(text: impl Into<CompactString>) -> Self {
        Self {
            text: text.into(),
            ..Self::BLANK
        }
    }

    /// True when any attribute differs from the terminal default.
    #[inline]
    pub fn has_attributes(&self) -> bool {
        self.fg.is_some() || self.bg.is_some() || !self.style.is_empty()
    }

    /// Attributes equal, text ignored.
    #[inline]
    pub fn same_attributes(&self, other: &Cell) -> bool {
        self.fg == other.fg && self.bg == other.bg && self.style == other.style
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

// =============================================================================
// Tests
// =============================================================================
