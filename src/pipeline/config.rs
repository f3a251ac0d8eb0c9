//! Scheduler configuration.
//!
//! Defaults, overridable with builder setters or from the environment:
//!
//! | Variable            | Meaning                         | Default |
//! |---------------------|---------------------------------|---------|
//! | `GLINT_TICK_MS`     | tick interval in milliseconds   | `50`    |
//! | `GLINT_RENDER_MODE` | `ansi` or `debug`               | `ansi`  |

use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::renderer::{AnsiRendering, DebugRendering, Rendering};

pub const TICK_ENV: &str = "GLINT_TICK_MS";
pub const MODE_ENV: &str = "GLINT_RENDER_MODE";

/// Fewest flush-and-yield rounds a shutdown drain performs.
pub const MIN_DRAIN_ROUNDS: u32 = 4;

const DEFAULT_TICK: Duration = Duration::from_millis(50);

// =============================================================================
// RenderMode
// =============================================================================

/// Which renderer the scheduler drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Incremental in-place repaint.
    #[default]
    Ansi,
    /// Append-only dump of tree, statics and frame.
    Debug,
}

impl RenderMode {
    pub fn renderer(self) -> Box<dyn Rendering> {
        match self {
            RenderMode::Ansi => Box::new(AnsiRendering::new()),
            RenderMode::Debug => Box::new(DebugRendering::new()),
        }
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ansi" => Ok(RenderMode::Ansi),
            "debug" => Ok(RenderMode::Debug),
            other => Err(format!("unknown render mode: {other}")),
        }
    }
}

// =============================================================================
// SchedulerConfig
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Upper bound on redraw frequency.
    pub tick_interval: Duration,
    /// Flush-and-yield rounds on shutdown, never below [`MIN_DRAIN_ROUNDS`].
    pub drain_rounds: u32,
    pub mode: RenderMode,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK,
            drain_rounds: MIN_DRAIN_ROUNDS,
            mode: RenderMode::default(),
        }
    }
}

impl SchedulerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with `GLINT_TICK_MS` / `GLINT_RENDER_MODE` applied.
    pub fn from_env() -> Self {
        Self::from_env_values(std::env::var(TICK_ENV).ok(), std::env::var(MODE_ENV).ok())
    }

    /// Testable core of [`from_env`](Self::from_env). Unparsable values are
    /// logged and ignored.
    pub fn from_env_values(tick_ms: Option<String>, mode: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = tick_ms {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.tick_interval = Duration::from_millis(ms),
                _ => warn!(variable = TICK_ENV, value = %raw, "ignoring invalid tick interval"),
            }
        }
        if let Some(raw) = mode {
            match raw.parse() {
                Ok(mode) => config.mode = mode,
                Err(error) => warn!(variable = MODE_ENV, %error, "ignoring render mode"),
            }
        }
        config
    }

    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn drain_rounds(mut self, rounds: u32) -> Self {
        self.drain_rounds = rounds.max(MIN_DRAIN_ROUNDS);
        self
    }

    pub fn mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
