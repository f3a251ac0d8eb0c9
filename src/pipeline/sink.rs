//! Display sinks - where rendered frames go.

use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use tracing::warn;

/// Receives one frame's text at a time, synchronously.
///
/// The scheduler does not start the next frame until `display` returns.
/// I/O failures are the sink's business; nothing is reported back.
pub trait DisplaySink: Send {
    fn display(&mut self, text: &str);
}

impl<F> DisplaySink for F
where
    F: FnMut(&str) + Send,
{
    fn display(&mut self, text: &str) {
        self(text)
    }
}

/// Writes frames to stdout with the cursor hidden.
///
/// The cursor is shown again when the sink is dropped.
#[derive(Debug)]
pub struct StdoutSink {
    stdout: io::Stdout,
}

impl StdoutSink {
    pub fn new() -> Self {
        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, Hide) {
            warn!(%error, "failed to hide cursor");
        }
        Self { stdout }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for StdoutSink {
    fn display(&mut self, text: &str) {
        let mut out = self.stdout.lock();
        if let Err(error) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            warn!(%error, bytes = text.len(), "failed to write frame");
        }
    }
}

impl Drop for StdoutSink {
    fn drop(&mut self) {
        if let Err(error) = execute!(self.stdout, Show) {
            warn!(%error, "failed to restore cursor");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
