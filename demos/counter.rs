//! Live counter with print-once log lines above it.
//!
//! Run with `cargo run --example counter`. Set `RUST_LOG=glint_tui=debug` to
//! see render cycles on stderr, `GLINT_RENDER_MODE=debug` for dumps.

use std::thread;
use std::time::Duration;

use glint_tui::types::{Color, TextStyle};
use glint_tui::{
    ContentSystem, FrameNotifier, LayoutNode, NodePath, QueuedContent, Result, Scheduler, SchedulerConfig, StdoutSink,
    TreeEdit, column, static_items, text,
};
use tracing_subscriber::EnvFilter;

const LOGS: usize = 0;
const STATUS: usize = 1;

/// Queued edits, plus clearing log lines once a frame has printed them.
struct CounterContent {
    queue: QueuedContent,
}

impl ContentSystem for CounterContent {
    fn on_change(&mut self, notifier: FrameNotifier) {
        self.queue.on_change(notifier);
    }

    fn apply_pending_edits(&mut self, root: &mut LayoutNode) -> Result<()> {
        // Anything still under the log node was printed by the previous frame.
        let logs = root.descendant_mut(&[0, LOGS])?;
        let printed = logs.children().len();
        logs.remove_children(0, printed)?;
        self.queue.apply_pending_edits(root)
    }

    fn flush_changes(&mut self) {
        self.queue.flush_changes();
    }

    fn dispose(&mut self) {
        self.queue.dispose();
    }
}

fn status(count: u32) -> LayoutNode {
    text(format!("count: {count}"))
        .fg(Color::CYAN)
        .style(TextStyle::BOLD)
        .into()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let root = LayoutNode::root().with_children([column([static_items([]), status(0)])]);
    let queue = QueuedContent::new();
    let sender = queue.sender();
    let handle = Scheduler::start(
        root,
        CounterContent { queue },
        StdoutSink::new(),
        SchedulerConfig::from_env(),
    )?;

    let column_path = NodePath::root().child(0);
    for count in 1..=40 {
        thread::sleep(Duration::from_millis(30));
        sender.push(TreeEdit::Replace {
            parent: column_path.clone(),
            index: STATUS,
            node: status(count),
        });
        if count % 10 == 0 {
            sender.push(TreeEdit::Insert {
                parent: column_path.child(LOGS),
                index: 0,
                node: text(format!("reached {count}")).fg(Color::GREEN).into(),
            });
        }
    }

    handle.shutdown()
}
