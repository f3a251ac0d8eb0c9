//! Layout engine - the node tree and its measure / place / draw protocol.
//!
//! # Architecture
//!
//! ```text
//! EditQueue ──apply──► LayoutNode (root, overlay)
//!                        ├─ policies: Measure / Draw / Statics / Debug
//!                        └─ children: Vec<LayoutNode>
//!                               │
//!              measure → place → draw ──► TextSurface
//! ```
//!
//! Nodes have no reactive behavior of their own. Everything that changes the
//! tree arrives as a [`TreeEdit`].

mod edit;
mod node;
mod policy;

pub use edit::{EditQueue, NodePath, TreeEdit};
pub use node::LayoutNode;
pub use policy::{
    DebugPolicy, Draw, DrawPolicy, DrawStatics, Measure, MeasurePolicy, Measured, Position, RenderDebug, Size,
    StaticPolicy,
};
