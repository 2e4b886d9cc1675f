//! Programmatic tree construction.

use compact_str::CompactString;
use ramble::indextree::NodeId;

use crate::document::{Document, DomError, NodeKind};

/// Appends nodes under a fixed parent. Obtained from [`Document::build`] or
/// [`Document::build_under`]; nested content is added through the closure
/// passed to [`TreeBuilder::element`].
///
/// ```
/// use thicket::Document;
///
/// let mut doc = Document::new();
/// doc.build(|b| {
///     b.element("p", |b| {
///         b.attr("class", "intro");
///         b.text("Hello ");
///         b.element("b", |b| {
///             b.text("world");
///         });
///     });
/// });
/// assert_eq!(doc.iter_text(doc.root()).unwrap().collect::<String>(), "Hello world");
/// ```
pub struct TreeBuilder<'d> {
    doc: &'d mut Document,
    parent: NodeId,
}

impl Document {
    /// Add content under the document node.
    pub fn build<R>(&mut self, f: impl FnOnce(&mut TreeBuilder<'_>) -> R) -> R {
        // the document node can never be removed
        let parent = self.root;
        f(&mut TreeBuilder { doc: self, parent })
    }

    /// Add content under `parent`. Fails with [`DomError::NodeRemoved`] if
    /// `parent` has been removed, before `f` runs.
    pub fn build_under<R>(
        &mut self,
        parent: NodeId,
        f: impl FnOnce(&mut TreeBuilder<'_>) -> R,
    ) -> Result<R, DomError> {
        self.check_live(parent)?;
        Ok(f(&mut TreeBuilder { doc: self, parent }))
    }
}

impl TreeBuilder<'_> {
    /// The node new content is appended to.
    pub fn parent(&self) -> NodeId {
        self.parent
    }

    /// Append an element and fill it with `children`.
    pub fn element(
        &mut self,
        name: impl Into<CompactString>,
        children: impl FnOnce(&mut TreeBuilder<'_>),
    ) -> NodeId {
        let id = self.doc.create_element(name);
        self.push(id);
        let mut nested = TreeBuilder {
            doc: &mut *self.doc,
            parent: id,
        };
        children(&mut nested);
        id
    }

    /// Set an attribute on the parent element.
    pub fn attr(&mut self, name: impl Into<CompactString>, value: impl Into<CompactString>) {
        self.doc.set_attr(self.parent, name, value);
    }

    pub fn text(&mut self, text: impl Into<CompactString>) -> NodeId {
        self.node(NodeKind::Text(text.into()))
    }

    pub fn cdata(&mut self, text: impl Into<CompactString>) -> NodeId {
        self.node(NodeKind::CData(text.into()))
    }

    pub fn comment(&mut self, text: impl Into<CompactString>) -> NodeId {
        self.node(NodeKind::Comment(text.into()))
    }

    pub fn pi(
        &mut self,
        target: impl Into<CompactString>,
        data: impl Into<CompactString>,
    ) -> NodeId {
        self.node(NodeKind::ProcessingInstruction {
            target: target.into(),
            data: data.into(),
        })
    }

    pub fn doctype(&mut self, name: impl Into<CompactString>) -> NodeId {
        self.node(NodeKind::DocumentType(name.into()))
    }

    /// Append an entity reference; `expansion` fills its (never walked)
    /// children.
    pub fn entity_ref(
        &mut self,
        name: impl Into<CompactString>,
        expansion: impl FnOnce(&mut TreeBuilder<'_>),
    ) -> NodeId {
        self.container(NodeKind::EntityReference(name.into()), expansion)
    }

    /// Append a DTD; `declarations` fills its (never walked) children.
    pub fn dtd(
        &mut self,
        name: impl Into<CompactString>,
        declarations: impl FnOnce(&mut TreeBuilder<'_>),
    ) -> NodeId {
        self.container(NodeKind::Dtd(name.into()), declarations)
    }

    pub fn xinclude_start(&mut self) -> NodeId {
        self.node(NodeKind::XIncludeStart)
    }

    pub fn xinclude_end(&mut self) -> NodeId {
        self.node(NodeKind::XIncludeEnd)
    }

    fn container(&mut self, kind: NodeKind, children: impl FnOnce(&mut TreeBuilder<'_>)) -> NodeId {
        let id = self.node(kind);
        let mut nested = TreeBuilder {
            doc: &mut *self.doc,
            parent: id,
        };
        children(&mut nested);
        id
    }

    fn node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.doc.create(kind);
        self.push(id);
        id
    }

    fn push(&mut self, id: NodeId) {
        // the parent was checked live when the builder was made, and nothing
        // can remove it while the builder holds the document
        self.parent.append(id, &mut self.doc.arena);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    #[test]
    fn test_build_under_existing_node() {
        let mut doc = Document::new();
        let body = doc.build(|b| b.element("body", |_| {}));
        let p = doc
            .build_under(body, |b| {
                b.element("p", |b| {
                    b.text("later");
                })
            })
            .unwrap();
        assert_eq!(doc.children(body).collect::<Vec<_>>(), [p]);
        assert_eq!(doc.iter_text(body).unwrap().collect::<String>(), "later");
    }

    #[test]
    fn test_build_under_removed_node_is_an_error() {
        let mut doc = Document::new();
        let body = doc.build(|b| b.element("body", |_| {}));
        doc.remove(body).unwrap();
        let before = doc.arena().count();

        let mut ran = false;
        let result = doc.build_under(body, |b| {
            ran = true;
            b.text("lost");
        });
        assert_eq!(result, Err(DomError::NodeRemoved));
        assert!(!ran);
        assert_eq!(doc.arena().count(), before);
    }
}
