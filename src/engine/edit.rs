//! Tree edits - the only way content reaches the layout tree.
//!
//! Producers resolve *what* changed on their own threads and push discrete
//! [`TreeEdit`]s into an [`EditQueue`]. The render thread drains the queue
//! strictly before measuring, so edits never interleave with a draw.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::LayoutNode;
use crate::error::EditError;

// =============================================================================
// NodePath
// =============================================================================

/// Child indices leading from the root to a node. Empty is the root itself.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path to the `index`th child of this node.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for NodePath {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

// =============================================================================
// TreeEdit
// =============================================================================

/// One already-resolved structural change, addressed by its parent's path.
#[derive(Debug)]
pub enum TreeEdit {
    Insert {
        parent: NodePath,
        index: usize,
        node: LayoutNode,
    },
    Remove {
        parent: NodePath,
        index: usize,
        count: usize,
    },
    Move {
        parent: NodePath,
        from: usize,
        to: usize,
        count: usize,
    },
    /// Swap the child at `index` for `node`.
    Replace {
        parent: NodePath,
        index: usize,
        node: LayoutNode,
    },
}

impl TreeEdit {
    pub fn parent(&self) -> &NodePath {
        match self {
            TreeEdit::Insert { parent, .. }
            | TreeEdit::Remove { parent, .. }
            | TreeEdit::Move { parent, .. }
            | TreeEdit::Replace { parent, .. } => parent,
        }
    }

    /// Apply against the tree under `root`. A failing edit leaves the tree untouched.
    pub fn apply(self, root: &mut LayoutNode) -> Result<(), EditError> {
        match self {
            TreeEdit::Insert { parent, index, node } => {
                root.descendant_mut(parent.indices())?.insert_child(index, node)
            }
            TreeEdit::Remove { parent, index, count } => {
                root.descendant_mut(parent.indices())?.remove_children(index, count)?;
                Ok(())
            }
            TreeEdit::Move {
                parent,
                from,
                to,
                count,
            } => root.descendant_mut(parent.indices())?.move_children(from, to, count),
            TreeEdit::Replace { parent, index, node } => {
                let target = root.descendant_mut(parent.indices())?;
                let len = target.children().len();
                if index >= len {
                    return Err(EditError::IndexOutOfRange { index, count: 1, len });
                }
                target.remove_children(index, 1)?;
                target.insert_child(index, node)
            }
        }
    }
}

// =============================================================================
// EditQueue
// =============================================================================

/// Thread-safe FIFO of pending edits. Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct EditQueue {
    inner: Arc<Mutex<VecDeque<TreeEdit>>>,
}

impl EditQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, edit: TreeEdit) {
        self.lock().push_back(edit);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Apply queued edits in order until the queue is empty.
    ///
    /// Stops at the first failing edit; later edits stay queued. Returns the
    /// number applied.
    pub fn apply_all(&self, root: &mut LayoutNode) -> Result<usize, EditError> {
        let mut applied = 0;
        // Pop one at a time so producers are never blocked for a whole batch.
        while let Some(edit) = self.pop() {
            edit.apply(root)?;
            applied += 1;
        }
        Ok(applied)
    }

    fn pop(&self) -> Option<TreeEdit> {
        self.lock().pop_front()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<TreeEdit>> {
        // A panic while holding the lock cannot leave a half-pushed edit behind.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Tests
// =============================================================================
