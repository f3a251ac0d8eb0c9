//! ANSI escape sequences used by the renderers.
//!
//! Only the vocabulary this crate needs:
//! - Cursor movement to the previous line start
//! - Clearing to end of line
//! - SGR color/style parameters and the full reset
//!
//! Everything writes into a `fmt::Write` so renderers can build frames in a
//! reused `String`.

use std::fmt::{self, Write};

use crate::types::Color;

// =============================================================================
// Constants
// =============================================================================

/// Control Sequence Introducer.
pub const CSI: &str = "\x1b[";

/// Move cursor up one line, to column zero.
pub const CURSOR_UP: &str = "\x1b[F";

/// Clear from cursor to end of line.
pub const CLEAR_LINE: &str = "\x1b[K";

/// Reset all attributes and colors.
pub const RESET: &str = "\x1b[0m";

/// SGR parameter: default foreground.
pub const DEFAULT_FG: u8 = 39;

/// SGR parameter: default background.
pub const DEFAULT_BG: u8 = 49;

// =============================================================================
// Cursor / Line Control
// =============================================================================

/// Move cursor to the start of the line `n` rows up (one sequence per row).
#[inline]
pub fn cursor_up<W: Write>(w: &mut W, n: usize) -> fmt::Result {
    for _ in 0..n {
        w.write_str(CURSOR_UP)?;
    }
    Ok(())
}

/// Clear from cursor to end of line.
#[inline]
pub fn erase_to_eol<W: Write>(w: &mut W) -> fmt::Result {
    w.write_str(CLEAR_LINE)
}

/// Reset all attributes and colors.
#[inline]
pub fn reset<W: Write>(w: &mut W) -> fmt::Result {
    w.write_str(RESET)
}

// =============================================================================
// SGR Parameters
// =============================================================================

/// One SGR parameter (or parameter group for extended colors).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sgr {
    /// A bare numeric parameter (style toggles, default colors).
    Code(u8),
    Foreground(Color),
    Background(Color),
}

impl fmt::Display for Sgr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Sgr::Code(code) => write!(f, "{code}"),
            Sgr::Foreground(Color::Ansi(index)) => match index {
                // Standard colors: 30-37
                0..=7 => write!(f, "{}", 30 + index),
                // Bright colors: 90-97
                8..=15 => write!(f, "{}", 90 + index - 8),
                // Extended palette: 38;5;n
                _ => write!(f, "38;5;{index}"),
            },
            Sgr::Foreground(Color::Rgb(r, g, b)) => write!(f, "38;2;{r};{g};{b}"),
            Sgr::Background(Color::Ansi(index)) => match index {
                0..=7 => write!(f, "{}", 40 + index),
                8..=15 => write!(f, "{}", 100 + index - 8),
                _ => write!(f, "48;5;{index}"),
            },
            Sgr::Background(Color::Rgb(r, g, b)) => write!(f, "48;2;{r};{g};{b}"),
        }
    }
}

/// Foreground parameter for an optional color (`None` = default).
#[inline]
pub fn fg_param(color: Option<Color>) -> Sgr {
    color.map_or(Sgr::Code(DEFAULT_FG), Color::fg)
}

/// Background parameter for an optional color (`None` = default).
#[inline]
pub fn bg_param(color: Option<Color>) -> Sgr {
    color.map_or(Sgr::Code(DEFAULT_BG), Color::bg)
}

/// Emit one escape sequence holding every parameter, joined by `;`.
///
/// Writes nothing for an empty parameter list.
pub fn sgr<W: Write>(w: &mut W, params: &[Sgr]) -> fmt::Result {
    let Some((first, rest)) = params.split_first() else {
        return Ok(());
    };
    write!(w, "{CSI}{first}")?;
    for param in rest {
        write!(w, ";{param}")?;
    }
    w.write_char('m')
}

// =============================================================================
// Tests
// =============================================================================
