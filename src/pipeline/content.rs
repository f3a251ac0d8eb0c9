//! The boundary to whatever decides what the tree looks like.
//!
//! ```text
//! producer threads                      render thread
//! ────────────────                      ─────────────
//! EditSender::push ──► EditQueue ──┐
//!        │                         ├──► apply_pending_edits(root)
//!        └──► FrameNotifier ───────┘        (before every measure)
//! ```
//!
//! Producers only ever set the pending flag. Rendering and tree mutation stay
//! on the render thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::{debug, trace};

use crate::engine::{EditQueue, LayoutNode, TreeEdit};
use crate::error::Result;

// =============================================================================
// FrameNotifier
// =============================================================================

/// Coalescing "a frame is needed" signal. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct FrameNotifier {
    pending: Arc<AtomicBool>,
}

impl FrameNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a frame pending. Repeated calls before the next tick collapse into one.
    pub fn notify(&self) {
        if self.pending.swap(true, Ordering::AcqRel) {
            trace!("frame notification coalesced");
        } else {
            trace!("frame requested");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Clear the flag, returning whether a frame was pending.
    pub(crate) fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

// =============================================================================
// ContentSystem
// =============================================================================

/// What the scheduler needs from the content side.
///
/// Every method runs on the render thread.
pub trait ContentSystem: Send {
    /// Called once at start with the signal to raise whenever rendering may be
    /// affected.
    fn on_change(&mut self, notifier: FrameNotifier);

    /// Apply queued structural edits. Runs before each measurement.
    fn apply_pending_edits(&mut self, root: &mut LayoutNode) -> Result<()>;

    /// Surface changes still in flight by raising the notifier for them.
    /// Called repeatedly while draining on shutdown.
    fn flush_changes(&mut self) {}

    /// Release resources. Called exactly once, last.
    fn dispose(&mut self) {}
}

// =============================================================================
// QueuedContent
// =============================================================================

/// [`ContentSystem`] backed by an [`EditQueue`].
#[derive(Debug, Default)]
pub struct QueuedContent {
    queue: EditQueue,
    notifier: Arc<OnceLock<FrameNotifier>>,
    disposed: bool,
}

impl QueuedContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle producers use to submit edits from any thread.
    pub fn sender(&self) -> EditSender {
        EditSender {
            queue: self.queue.clone(),
            notifier: Arc::clone(&self.notifier),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl ContentSystem for QueuedContent {
    fn on_change(&mut self, notifier: FrameNotifier) {
        if self.notifier.set(notifier).is_err() {
            debug!("content already attached to a notifier");
        }
    }

    fn apply_pending_edits(&mut self, root: &mut LayoutNode) -> Result<()> {
        let applied = self.queue.apply_all(root)?;
        if applied > 0 {
            trace!(applied, "applied tree edits");
        }
        Ok(())
    }

    fn flush_changes(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        if let Some(notifier) = self.notifier.get() {
            notifier.notify();
        }
    }

    fn dispose(&mut self) {
        self.disposed = true;
        debug!(remaining = self.queue.len(), "content disposed");
    }
}

/// Producer side of a [`QueuedContent`]. Cheap to clone and `Send`.
#[derive(Debug, Clone)]
pub struct EditSender {
    queue: EditQueue,
    notifier: Arc<OnceLock<FrameNotifier>>,
}

impl EditSender {
    /// Queue an edit and request a frame.
    pub fn push(&self, edit: TreeEdit) {
        self.queue.push(edit);
        // Not attached yet: the first frame applies everything anyway.
        if let Some(notifier) = self.notifier.get() {
            notifier.notify();
        }
    }

    /// Request a frame without a structural change.
    pub fn touch(&self) {
        if let Some(notifier) = self.notifier.get() {
            notifier.notify();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NodePath;
    use crate::primitives::text;

    fn insert(value: &str) -> TreeEdit {
        TreeEdit::Insert {
            parent: NodePath::root(),
            index: 0,
            node: text(value).into(),
        }
    }

    #[test]
    fn test_notifier_coalesces() {
        let notifier = FrameNotifier::new();
        let producer = notifier.clone();
        producer.notify();
        producer.notify();
        assert!(notifier.is_pending());
        assert!(notifier.take());
        assert!(!notifier.take());
    }

    #[test]
    fn test_sender_notifies_once_attached() {
        let mut content = QueuedContent::new();
        let sender = content.sender();
        sender.push(insert("early"));

        let notifier = FrameNotifier::new();
        content.on_change(notifier.clone());
        assert!(!notifier.is_pending());

        sender.push(insert("late"));
        assert!(notifier.is_pending());

        let mut root = LayoutNode::root();
        content.apply_pending_edits(&mut root).unwrap();
        assert_eq!(root.children().len(), 2);
    }

    #[test]
    fn test_flush_resignals_while_edits_remain() {
        let mut content = QueuedContent::new();
        let notifier = FrameNotifier::new();
        content.on_change(notifier.clone());

        content.flush_changes();
        assert!(!notifier.is_pending());

        content.sender().push(insert("x"));
        notifier.take();
        content.flush_changes();
        assert!(notifier.take());
    }

    #[test]
    fn test_failed_edit_surfaces_as_error() {
        let mut content = QueuedContent::new();
        content.sender().push(TreeEdit::Remove {
            parent: NodePath::root(),
            index: 0,
            count: 1,
        });
        let mut root = LayoutNode::root();
        let err = content.apply_pending_edits(&mut root).unwrap_err();
        assert!(matches!(err, crate::error::Error::Edit(_)));
    }

    #[test]
    fn test_dispose() {
        let mut content = QueuedContent::new();
        assert!(!content.is_disposed());
        content.dispose();
        assert!(content.is_disposed());
    }
}
