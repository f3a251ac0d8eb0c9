//! The render loop.
//!
//! One named thread owns the tree, the renderer and the sink:
//!
//! ```text
//!            notify() ─► pending flag ◄─ flush_changes()
//!                             │
//!  ┌──── tick ────────────────▼───────────────────────────────┐
//!  │ take pending? ─yes─► apply edits ─► render ─► display   │
//!  │      │ no                                               │
//!  │      ▼                                                  │
//!  │ wait tick_interval (or Shutdown)                        │
//!  └──────────────────────────────────────────────────────────┘
//!                  │ Shutdown
//!                  ▼
//!  drain: N × (yield + flush_changes) ─► render once if pending
//!                  │
//!                  ▼
//!             dispose content, Terminated
//! ```
//!
//! Producers never touch the tree; at most one frame is ever in flight.

use std::any::Any;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, debug_span, info, warn};

use super::config::{MIN_DRAIN_ROUNDS, SchedulerConfig};
use super::content::{ContentSystem, FrameNotifier};
use super::sink::DisplaySink;
use crate::engine::LayoutNode;
use crate::error::{Error, Result};
use crate::renderer::Rendering;

const THREAD_NAME: &str = "glint-render";

// =============================================================================
// State
// =============================================================================

/// Where the render loop is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SchedulerState {
    Idle = 0,
    /// Idle with a frame pending for the next tick.
    FrameRequested = 1,
    Rendering = 2,
    Draining = 3,
    Terminated = 4,
}

impl SchedulerState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => SchedulerState::Idle,
            1 => SchedulerState::FrameRequested,
            2 => SchedulerState::Rendering,
            3 => SchedulerState::Draining,
            _ => SchedulerState::Terminated,
        }
    }
}

/// Counters shared between the loop and its handle.
#[derive(Debug)]
struct Shared {
    state: AtomicU8,
    frames: AtomicU64,
}

impl Shared {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(SchedulerState::Idle as u8),
            frames: AtomicU64::new(0),
        }
    }

    fn set_state(&self, state: SchedulerState) {
        self.state.store(state as u8, Ordering::Release);
    }

    fn state(&self) -> SchedulerState {
        SchedulerState::from_u8(self.state.load(Ordering::Acquire))
    }
}

#[derive(Debug)]
enum Control {
    Shutdown,
}

// =============================================================================
// Scheduler
// =============================================================================

/// Entry point for the render loop.
pub struct Scheduler;

impl Scheduler {
    /// Spawn the render thread. The first frame is rendered immediately.
    ///
    /// `root` is normally [`LayoutNode::root`]; `content` fills it through edits.
    pub fn start<C, S>(root: LayoutNode, mut content: C, sink: S, config: SchedulerConfig) -> Result<SchedulerHandle>
    where
        C: ContentSystem + 'static,
        S: DisplaySink + 'static,
    {
        let notifier = FrameNotifier::new();
        content.on_change(notifier.clone());
        notifier.notify();

        let shared = Arc::new(Shared::new());
        let (control_tx, control_rx) = mpsc::channel();

        let render_loop = RenderLoop {
            root,
            content: Box::new(content),
            sink: Box::new(sink),
            renderer: config.mode.renderer(),
            notifier: notifier.clone(),
            shared: Arc::clone(&shared),
            config,
        };

        let thread = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || render_loop.run(&control_rx))?;

        Ok(SchedulerHandle {
            control: Some(control_tx),
            thread: Some(thread),
            notifier,
            shared,
        })
    }
}

struct RenderLoop {
    root: LayoutNode,
    content: Box<dyn ContentSystem>,
    sink: Box<dyn DisplaySink>,
    renderer: Box<dyn Rendering>,
    notifier: FrameNotifier,
    shared: Arc<Shared>,
    config: SchedulerConfig,
}

impl RenderLoop {
    fn run(mut self, control: &Receiver<Control>) -> Result<()> {
        info!(
            tick_ms = self.config.tick_interval.as_millis() as u64,
            mode = ?self.config.mode,
            "scheduler started"
        );

        let result = self.tick_until_shutdown(control).and_then(|()| self.drain());

        let frames = self.shared.frames.load(Ordering::Acquire);
        drop(self);
        match &result {
            Ok(()) => info!(frames, "scheduler stopped"),
            Err(error) => warn!(frames, %error, "scheduler stopped after a failed frame"),
        }
        result
    }

    fn tick_until_shutdown(&mut self, control: &Receiver<Control>) -> Result<()> {
        loop {
            if self.notifier.take() {
                self.render_frame()?;
            }
            match control.recv_timeout(self.config.tick_interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(Control::Shutdown) | Err(RecvTimeoutError::Disconnected) => return Ok(()),
            }
        }
    }

    /// Surface in-flight changes, then render once more if any showed up.
    fn drain(&mut self) -> Result<()> {
        self.shared.set_state(SchedulerState::Draining);
        let rounds = self.config.drain_rounds.max(MIN_DRAIN_ROUNDS);
        debug!(rounds, "draining");
        for _ in 0..rounds {
            thread::yield_now();
            self.content.flush_changes();
        }
        if self.notifier.take() {
            self.render_frame()?;
            self.shared.set_state(SchedulerState::Draining);
        }
        Ok(())
    }

    fn render_frame(&mut self) -> Result<()> {
        let frame = self.shared.frames.load(Ordering::Acquire) + 1;
        let _span = debug_span!("render_cycle", frame).entered();
        self.shared.set_state(SchedulerState::Rendering);

        self.content.apply_pending_edits(&mut self.root)?;
        let text = self.renderer.render(&mut self.root)?;
        self.sink.display(text);

        self.shared.frames.store(frame, Ordering::Release);
        debug!(bytes = text.len(), "frame displayed");
        self.shared.set_state(SchedulerState::Idle);
        Ok(())
    }
}

/// Runs on every exit from the loop, unwinding included.
impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.shared.set_state(SchedulerState::Terminated);
        self.content.dispose();
    }
}

// =============================================================================
// SchedulerHandle
// =============================================================================

/// Owner's side of a running scheduler.
///
/// Dropping it shuts the loop down the same way [`shutdown`](Self::shutdown)
/// does, logging instead of returning any error.
#[derive(Debug)]
pub struct SchedulerHandle {
    control: Option<Sender<Control>>,
    thread: Option<JoinHandle<Result<()>>>,
    notifier: FrameNotifier,
    shared: Arc<Shared>,
}

impl SchedulerHandle {
    /// A signal any thread may raise to request a frame.
    pub fn notifier(&self) -> FrameNotifier {
        self.notifier.clone()
    }

    pub fn state(&self) -> SchedulerState {
        match self.shared.state() {
            SchedulerState::Idle if self.notifier.is_pending() => SchedulerState::FrameRequested,
            state => state,
        }
    }

    /// Completed render cycles so far.
    pub fn frames_rendered(&self) -> u64 {
        self.shared.frames.load(Ordering::Acquire)
    }

    /// Drain, render the final frame if one is pending, and join the thread.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(control) = self.control.take() {
            // A closed channel means the loop already exited on its own.
            let _ = control.send(Control::Shutdown);
        }
        let Some(thread) = self.thread.take() else {
            return Ok(());
        };
        thread
            .join()
            .map_err(|payload| Error::RenderPanicked(panic_message(payload.as_ref())))?
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        if let Err(error) = self.stop() {
            warn!(%error, "scheduler dropped with an error");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

// =============================================================================
// Tests
// =============================================================================
