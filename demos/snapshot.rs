//! One-shot output: render a tree once, then dump it with the debug renderer.
//!
//! Run with `cargo run --example snapshot`.

use glint_tui::types::{Color, TextStyle};
use glint_tui::{DebugRendering, LayoutNode, Rendering, Result, column, render_to_string, row, static_items, text};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn tree() -> LayoutNode {
    LayoutNode::root().with_children([column([
        static_items([text("build started").style(TextStyle::DIM).into()]),
        row([
            text("[").into(),
            text(" ok ").fg(Color::GREEN).style(TextStyle::BOLD).into(),
            text("] ").into(),
            text("compiled 12 crates").into(),
        ]),
        row([
            text("[").into(),
            text("warn").fg(Color::YELLOW).style(TextStyle::BOLD).into(),
            text("] ").into(),
            text("unused import").style(TextStyle::ITALIC | TextStyle::UNDERLINE).into(),
        ]),
    ])])
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut root = tree();
    let output = render_to_string(&mut root)?;
    info!(bytes = output.len(), "rendered snapshot");
    print!("{output}");

    let mut debug = DebugRendering::new();
    print!("\n{}", debug.render(&mut root)?);
    Ok(())
}
