//! Removing nodes while walking over them.
//!
//! Both operations find their targets with a single walk and edit the tree
//! as they go. A matched node is never edited while it is the cursor's
//! current node: it is remembered and edited on the next visit (or after the
//! walk ends), once the cursor has moved past it.

use std::ops::ControlFlow;

use ramble::WalkMode;
use ramble::indextree::NodeId;

use crate::debug;
use crate::document::{Document, DomError, NodeKind};
use crate::name::{NameTest, NameTests};

impl Document {
    /// Remove every descendant of `node` matching any of `tests`, together
    /// with its subtree. With `with_tail`, the text and CDATA nodes directly
    /// following each removed node go too.
    ///
    /// Returns the number of matched nodes removed (tails not counted).
    pub fn strip_elements<I, T>(
        &mut self,
        node: NodeId,
        tests: I,
        with_tail: bool,
    ) -> Result<usize, DomError>
    where
        I: IntoIterator<Item = T>,
        T: Into<NameTest>,
    {
        let tests = NameTests::new(tests);
        if tests.is_empty() {
            return Ok(0);
        }

        let mut pending: Option<NodeId> = None;
        let mut removed = 0;
        let (start, inclusive) = self.content_start(node, false);
        self.for_each_mut(start, Some(node), inclusive, WalkMode::ElementLike, |doc, current, cursor| {
            if let Some(target) = pending.take() {
                doc.remove_with_tail(target, with_tail);
                removed += 1;
            }
            if doc.get(current).is_some_and(|data| tests.matches(data)) {
                // everything below goes with it
                cursor.skip_subtree();
                pending = Some(current);
            }
            ControlFlow::Continue(())
        })?;
        if let Some(target) = pending {
            self.remove_with_tail(target, with_tail);
            removed += 1;
        }

        debug!(removed, with_tail, "strip_elements");
        Ok(removed)
    }

    /// Replace every descendant of `node` matching any of `tests` by its
    /// children. Content of a stripped node is still searched, so nested
    /// matches are stripped as well. Comments, processing instructions and
    /// entity references have no content to keep and are simply removed.
    ///
    /// Returns the number of nodes stripped.
    pub fn strip_tags<I, T>(&mut self, node: NodeId, tests: I) -> Result<usize, DomError>
    where
        I: IntoIterator<Item = T>,
        T: Into<NameTest>,
    {
        let tests = NameTests::new(tests);
        if tests.is_empty() {
            return Ok(0);
        }

        let mut pending: Option<NodeId> = None;
        let mut stripped = 0;
        let (start, inclusive) = self.content_start(node, false);
        self.for_each_mut(start, Some(node), inclusive, WalkMode::ElementLike, |doc, current, cursor| {
            if let Some(target) = pending.take() {
                doc.strip_one(target);
                stripped += 1;
            }
            let Some(data) = doc.get(current) else {
                return ControlFlow::Continue(());
            };
            if tests.matches(data) {
                if matches!(data.kind, NodeKind::EntityReference(_)) {
                    // its children are not content, drop them with it
                    cursor.skip_subtree();
                }
                pending = Some(current);
            }
            ControlFlow::Continue(())
        })?;
        if let Some(target) = pending {
            self.strip_one(target);
            stripped += 1;
        }

        debug!(stripped, "strip_tags");
        Ok(stripped)
    }

    fn strip_one(&mut self, node: NodeId) {
        let result = if matches!(self.kind(node), Some(NodeKind::Element(_))) {
            self.unwrap(node)
        } else {
            self.remove(node)
        };
        if let Err(_err) = result {
            debug!(?node, error = %_err, "strip target already gone");
        }
    }

    fn remove_with_tail(&mut self, node: NodeId, with_tail: bool) {
        if with_tail {
            let mut next = ramble::NodeStore::next_sibling(self, node);
            while let Some(tail) = next {
                if !matches!(self.kind(tail), Some(NodeKind::Text(_) | NodeKind::CData(_))) {
                    break;
                }
                next = ramble::NodeStore::next_sibling(self, tail);
                if let Err(_err) = self.remove(tail) {
                    debug!(node = ?tail, error = %_err, "tail already gone");
                }
            }
        }
        if let Err(_err) = self.remove(node) {
            debug!(?node, error = %_err, "strip target already gone");
        }
    }
}
