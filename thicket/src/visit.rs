//! Walks whose visitor may edit the document.

use std::ops::ControlFlow;

use ramble::indextree::NodeId;
use ramble::{Cursor, WalkMode};

use crate::debug;
use crate::document::{Document, DomError};

impl Document {
    /// Walk from `start` in document order, calling `visitor` on every node
    /// that `mode` selects. See [`Cursor::begin`] for `boundary` and
    /// `inclusive`.
    ///
    /// The visitor gets the document mutably and may restructure it. The next
    /// node is computed only after the visitor returns, from the links that
    /// exist then. Edits to the current node's descendants, to later
    /// siblings, or anywhere else in the tree are picked up. Detaching or
    /// removing the *current* node cuts the walk short; call
    /// [`Cursor::skip_subtree`] and remove it on the next visit instead.
    ///
    /// Returning [`ControlFlow::Break`] stops the walk.
    pub fn for_each_mut<F>(
        &mut self,
        start: NodeId,
        boundary: Option<NodeId>,
        inclusive: bool,
        mode: WalkMode,
        mut visitor: F,
    ) -> Result<(), DomError>
    where
        F: FnMut(&mut Document, NodeId, &mut Cursor<NodeId>) -> ControlFlow<()>,
    {
        let mut cursor = Cursor::begin(&*self, start, boundary, inclusive, mode)?;
        let mut _visited = 0usize;
        while let Some(node) = cursor.advance(&*self) {
            _visited += 1;
            if visitor(self, node, &mut cursor).is_break() {
                debug!(visited = _visited, "walk stopped by visitor");
                return Ok(());
            }
        }
        debug!(visited = _visited, "walk exhausted");
        Ok(())
    }
}
