//! Read-only iteration in document order.

use std::iter::FusedIterator;

use ramble::indextree::NodeId;
use ramble::{NodeStore, Walk, WalkMode};

use crate::document::{Document, DomError, NodeKind};
use crate::name::{NameTest, NameTests};

/// Element-like nodes selected by a set of [`NameTest`]s.
///
/// Created by [`Document::iter`] and [`Document::iter_descendants`].
pub struct Iter<'d> {
    doc: &'d Document,
    walk: Walk<'d, Document>,
    tests: NameTests,
}

impl Iterator for Iter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let node = self.walk.next()?;
            if self.tests.is_empty() {
                return Some(node);
            }
            if self.doc.get(node).is_some_and(|data| self.tests.matches(data)) {
                return Some(node);
            }
        }
    }
}

impl FusedIterator for Iter<'_> {}

/// Text content of text and CDATA nodes. Created by [`Document::iter_text`].
pub struct IterText<'d> {
    doc: &'d Document,
    walk: Walk<'d, Document>,
}

impl<'d> Iterator for IterText<'d> {
    type Item = &'d str;

    fn next(&mut self) -> Option<&'d str> {
        let doc = self.doc;
        self.walk.by_ref().find_map(|node| match doc.kind(node)? {
            NodeKind::Text(text) | NodeKind::CData(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl FusedIterator for IterText<'_> {}

impl Document {
    /// `node` and its element-like descendants, in document order, that match
    /// any of `tests`. With no tests, every element, comment, processing
    /// instruction and entity reference is returned. On the document node
    /// this covers the whole document, top-level comments and PIs included.
    ///
    /// ```
    /// use thicket::{Document, NameTest};
    ///
    /// let mut doc = Document::new();
    /// let root = doc.build(|b| {
    ///     b.element("root", |b| {
    ///         b.element("a", |b| {
    ///             b.comment("note");
    ///         });
    ///         b.element("b", |_| {});
    ///     })
    /// });
    ///
    /// let names: Vec<_> = doc
    ///     .iter(root, ["a", "b"])
    ///     .unwrap()
    ///     .filter_map(|id| doc.name(id))
    ///     .collect();
    /// assert_eq!(names, ["a", "b"]);
    ///
    /// assert_eq!(doc.iter(root, [NameTest::Comment]).unwrap().count(), 1);
    /// ```
    pub fn iter<I, T>(&self, node: NodeId, tests: I) -> Result<Iter<'_>, DomError>
    where
        I: IntoIterator<Item = T>,
        T: Into<NameTest>,
    {
        self.select(node, true, tests)
    }

    /// Like [`iter`](Self::iter), without `node` itself.
    pub fn iter_descendants<I, T>(&self, node: NodeId, tests: I) -> Result<Iter<'_>, DomError>
    where
        I: IntoIterator<Item = T>,
        T: Into<NameTest>,
    {
        self.select(node, false, tests)
    }

    /// Text of every text and CDATA node inside `node` (or `node` itself), in
    /// document order. Text behind entity references is not included.
    pub fn iter_text(&self, node: NodeId) -> Result<IterText<'_>, DomError> {
        let walk = ramble::walk(self, node, Some(node), true, WalkMode::AllNodes)?;
        Ok(IterText { doc: self, walk })
    }

    /// Where an element-like walk over `node` begins. The document node is
    /// never element-like, so a walk started on it would end at once; its
    /// content is entered through its first child instead.
    pub(crate) fn content_start(&self, node: NodeId, inclusive: bool) -> (NodeId, bool) {
        if matches!(self.kind(node), Some(NodeKind::Document)) {
            if let Some(first) = NodeStore::first_child(self, node) {
                return (first, true);
            }
        }
        (node, inclusive)
    }

    fn select<I, T>(&self, node: NodeId, inclusive: bool, tests: I) -> Result<Iter<'_>, DomError>
    where
        I: IntoIterator<Item = T>,
        T: Into<NameTest>,
    {
        let (start, inclusive) = self.content_start(node, inclusive);
        let walk = ramble::walk(self, start, Some(node), inclusive, WalkMode::ElementLike)?;
        Ok(Iter {
            doc: self,
            walk,
            tests: NameTests::new(tests),
        })
    }
}
