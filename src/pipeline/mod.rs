//! Render pipeline
//!
//! Connects the content system to the terminal.
//!
//! ```text
//! ContentSystem ─edits─► LayoutNode ─draw─► Rendering ─text─► DisplaySink
//!        ▲                                                         │
//!        └──────── FrameNotifier ◄── producers       Scheduler drives it all
//! ```
//!
//! - [`Scheduler`] owns the cadence: one render per tick at most, only when a
//!   frame is pending, and a loss-free drain on shutdown
//! - [`QueuedContent`] is a ready-made content system over an edit queue
//! - [`StdoutSink`] writes frames to the terminal

mod config;
mod content;
mod scheduler;
mod sink;

pub use config::{MIN_DRAIN_ROUNDS, MODE_ENV, RenderMode, SchedulerConfig, TICK_ENV};
pub use content::{ContentSystem, EditSender, FrameNotifier, QueuedContent};
pub use scheduler::{Scheduler, SchedulerHandle, SchedulerState};
pub use sink::{DisplaySink, StdoutSink};
