//! # glint-tui
//!
//! Inline terminal rendering for a tree of rectangular nodes.
//!
//! ## Architecture
//!
//! An external content system decides what the tree looks like and sends
//! discrete edits. The core applies them, lays the tree out, draws it into a
//! character-cell canvas, and repaints only what the terminal needs:
//! ```text
//! TreeEdits → LayoutNode (measure → place → draw) → TextSurface → Rendering → DisplaySink
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Color, TextStyle, Cell)
//! - [`canvas`] - Cell grids, views, and the ANSI-diffing serializer
//! - [`engine`] - Layout nodes, policies, and tree edits
//! - [`primitives`] - Built-in node kinds (text, row, column, static)
//! - [`renderer`] - Incremental and debug renderers
//! - [`pipeline`] - Content boundary, sinks, and the scheduler loop
//!
//! ## Example
//!
//! ```
//! use glint_tui::{LayoutNode, render_to_string, text};
//! use glint_tui::types::{Color, TextStyle};
//!
//! let mut root = LayoutNode::root().with_children([
//!     text("Hi").fg(Color::RED).style(TextStyle::BOLD).into(),
//! ]);
//! assert_eq!(render_to_string(&mut root).unwrap(), "\x1b[31;1mHi\x1b[0m\n");
//! ```

pub mod canvas;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use canvas::{TextCanvas, TextSurface, TextView};
pub use engine::{
    DebugPolicy, Draw, DrawPolicy, DrawStatics, EditQueue, LayoutNode, Measure, MeasurePolicy, Measured, NodePath,
    Position, RenderDebug, Size, StaticPolicy, TreeEdit,
};
pub use error::{CanvasError, EditError, Error, Result};
pub use pipeline::{
    ContentSystem, DisplaySink, EditSender, FrameNotifier, QueuedContent, RenderMode, Scheduler, SchedulerConfig,
    SchedulerHandle, SchedulerState, StdoutSink,
};
pub use primitives::{column, row, static_items, text};
pub use renderer::{AnsiRendering, DebugRendering, Rendering, render_to_string};
