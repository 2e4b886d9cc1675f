//! Arena-based document tree.
//!
//! - **indextree Arena**: all nodes in contiguous memory, addressed by `NodeId`
//! - **Stable handles**: a `NodeId` stays valid until its node is removed, and
//!   a removed node is reported as dead instead of panicking
//! - **Walkable**: `Document` is a [`NodeStore`], so any `ramble` walk runs
//!   directly over it

use compact_str::CompactString;
use indexmap::IndexMap;
use ramble::indextree::{Arena, NodeError, NodeId};
use ramble::{Classify, NodeStore, NodeType, WalkError};

use crate::debug;

/// Errors from structural edits on a [`Document`].
#[derive(facet::Facet, Debug, Clone, Copy, PartialEq, Eq)]
#[facet(derive(Error))]
#[repr(u8)]
pub enum DomError {
    /// node has been removed from the document
    NodeRemoved,

    /// cannot insert a node into its own subtree
    CycleDetected,

    /// the document node cannot be moved or removed
    RootMutation,

    /// invalid walk: {error}
    Walk { error: WalkError },
}

impl From<WalkError> for DomError {
    fn from(error: WalkError) -> Self {
        DomError::Walk { error }
    }
}

impl From<NodeError> for DomError {
    fn from(error: NodeError) -> Self {
        match error {
            NodeError::Removed => DomError::NodeRemoved,
            _ => DomError::CycleDetected,
        }
    }
}

/// Element name and attributes, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name, prefix included if any (`svg:rect`).
    pub name: CompactString,

    /// Attributes in insertion order.
    pub attrs: IndexMap<CompactString, CompactString>,
}

/// Payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The document node (always the root).
    Document,
    Element(ElementData),
    Text(CompactString),
    CData(CompactString),
    Comment(CompactString),
    ProcessingInstruction {
        target: CompactString,
        data: CompactString,
    },
    /// `&name;`, with the entity name only.
    EntityReference(CompactString),
    /// `<!DOCTYPE name>`
    DocumentType(CompactString),
    /// DTD with an internal subset; declarations live in its children.
    Dtd(CompactString),
    XIncludeStart,
    XIncludeEnd,
}

/// A node as stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub kind: NodeKind,
}

impl NodeData {
    pub fn new(kind: NodeKind) -> Self {
        NodeData { kind }
    }

    /// Element name, entity name, or PI target.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(elem) => Some(&elem.name),
            NodeKind::ProcessingInstruction { target, .. } => Some(target),
            NodeKind::EntityReference(name)
            | NodeKind::DocumentType(name)
            | NodeKind::Dtd(name) => Some(name),
            _ => None,
        }
    }

    /// Character content of text, CDATA, comment and PI nodes.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) | NodeKind::CData(text) | NodeKind::Comment(text) => Some(text),
            NodeKind::ProcessingInstruction { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(elem) => Some(elem),
            _ => None,
        }
    }
}

impl Classify for NodeData {
    fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Document => NodeType::Document,
            NodeKind::Element(_) => NodeType::Element,
            NodeKind::Text(_) => NodeType::Text,
            NodeKind::CData(_) => NodeType::CData,
            NodeKind::Comment(_) => NodeType::Comment,
            NodeKind::ProcessingInstruction { .. } => NodeType::ProcessingInstruction,
            NodeKind::EntityReference(_) => NodeType::EntityReference,
            NodeKind::DocumentType(_) => NodeType::DocumentType,
            NodeKind::Dtd(_) => NodeType::Dtd,
            NodeKind::XIncludeStart => NodeType::XIncludeStart,
            NodeKind::XIncludeEnd => NodeType::XIncludeEnd,
        }
    }
}

/// Document = Arena + the id of its document node.
#[derive(Debug, Clone)]
pub struct Document {
    /// THE tree - all nodes live here, attached or not
    pub(crate) arena: Arena<NodeData>,

    /// The document node
    pub(crate) root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document: just the document node.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeData::new(NodeKind::Document));
        Document { arena, root }
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The underlying arena, for read-only access with `indextree` APIs.
    pub fn arena(&self) -> &Arena<NodeData> {
        &self.arena
    }

    /// First element child of the document node.
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(self.root)
            .find(|&id| matches!(self.kind(id), Some(NodeKind::Element(_))))
    }

    /// Payload of `id`, or `None` if the node has been removed.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.arena
            .get(id)
            .filter(|node| !node.is_removed())
            .map(|node| node.get())
    }

    /// Mutable payload of `id`, or `None` if the node has been removed.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.arena
            .get_mut(id)
            .filter(|node| !node.is_removed())
            .map(|node| node.get_mut())
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(|data| &data.kind)
    }

    /// See [`NodeData::name`].
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.name()
    }

    /// See [`NodeData::text`].
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.text()
    }

    /// Attribute value of an element.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.element()?.attrs.get(name).map(|v| v.as_str())
    }

    /// Set an attribute on an element; returns `false` for non-elements.
    pub fn set_attr(
        &mut self,
        id: NodeId,
        name: impl Into<CompactString>,
        value: impl Into<CompactString>,
    ) -> bool {
        match self.get_mut(id).map(|data| &mut data.kind) {
            Some(NodeKind::Element(elem)) => {
                elem.attrs.insert(name.into(), value.into());
                true
            }
            _ => false,
        }
    }

    /// Whether `id` names a node that has not been removed.
    pub fn is_live(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Iterate children of a node
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let first = NodeStore::first_child(self, id);
        std::iter::successors(first, move |&child| NodeStore::next_sibling(self, child))
    }

    /// Number of nodes currently reachable from the document node.
    pub fn len(&self) -> usize {
        self.root.descendants(&self.arena).count()
    }

    /// A document always holds its document node.
    pub fn is_empty(&self) -> bool {
        false
    }

    // Node creation. New nodes are unattached until inserted.

    pub fn create_element(&mut self, name: impl Into<CompactString>) -> NodeId {
        self.create(NodeKind::Element(ElementData {
            name: name.into(),
            attrs: IndexMap::new(),
        }))
    }

    pub fn create_text(&mut self, text: impl Into<CompactString>) -> NodeId {
        self.create(NodeKind::Text(text.into()))
    }

    pub fn create_cdata(&mut self, text: impl Into<CompactString>) -> NodeId {
        self.create(NodeKind::CData(text.into()))
    }

    pub fn create_comment(&mut self, text: impl Into<CompactString>) -> NodeId {
        self.create(NodeKind::Comment(text.into()))
    }

    pub fn create_pi(
        &mut self,
        target: impl Into<CompactString>,
        data: impl Into<CompactString>,
    ) -> NodeId {
        self.create(NodeKind::ProcessingInstruction {
            target: target.into(),
            data: data.into(),
        })
    }

    pub fn create_entity_ref(&mut self, name: impl Into<CompactString>) -> NodeId {
        self.create(NodeKind::EntityReference(name.into()))
    }

    pub fn create_doctype(&mut self, name: impl Into<CompactString>) -> NodeId {
        self.create(NodeKind::DocumentType(name.into()))
    }

    pub fn create_dtd(&mut self, name: impl Into<CompactString>) -> NodeId {
        self.create(NodeKind::Dtd(name.into()))
    }

    pub fn create_xinclude_start(&mut self) -> NodeId {
        self.create(NodeKind::XIncludeStart)
    }

    pub fn create_xinclude_end(&mut self) -> NodeId {
        self.create(NodeKind::XIncludeEnd)
    }

    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        self.arena.new_node(NodeData::new(kind))
    }

    // Structural edits. Moving a node that is already attached detaches it
    // from its old place first.

    /// Append `child` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_movable(child)?;
        self.check_live(parent)?;
        parent.checked_append(child, &mut self.arena)?;
        Ok(())
    }

    /// Insert `child` as the first child of `parent`.
    pub fn prepend(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_movable(child)?;
        self.check_live(parent)?;
        parent.checked_prepend(child, &mut self.arena)?;
        Ok(())
    }

    /// Insert `node` right before `sibling`.
    pub fn insert_before(&mut self, sibling: NodeId, node: NodeId) -> Result<(), DomError> {
        self.check_movable(node)?;
        self.check_movable(sibling)?;
        self.check_not_ancestor(node, sibling)?;
        sibling.checked_insert_before(node, &mut self.arena)?;
        Ok(())
    }

    /// Insert `node` right after `sibling`.
    pub fn insert_after(&mut self, sibling: NodeId, node: NodeId) -> Result<(), DomError> {
        self.check_movable(node)?;
        self.check_movable(sibling)?;
        self.check_not_ancestor(node, sibling)?;
        sibling.checked_insert_after(node, &mut self.arena)?;
        Ok(())
    }

    /// Unlink `node` (and its subtree) from its parent. The node stays live
    /// and can be inserted again.
    pub fn detach(&mut self, node: NodeId) -> Result<(), DomError> {
        self.check_movable(node)?;
        node.detach(&mut self.arena);
        Ok(())
    }

    /// Remove `node` and its whole subtree. Their handles become dead.
    pub fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        self.check_movable(node)?;
        debug!(?node, "remove subtree");
        node.remove_subtree(&mut self.arena);
        Ok(())
    }

    /// Replace `node` by its children, then remove it.
    pub fn unwrap(&mut self, node: NodeId) -> Result<(), DomError> {
        self.check_movable(node)?;
        debug!(?node, "unwrap");
        node.remove(&mut self.arena);
        Ok(())
    }

    pub(crate) fn check_live(&self, id: NodeId) -> Result<(), DomError> {
        if self.is_live(id) {
            Ok(())
        } else {
            Err(DomError::NodeRemoved)
        }
    }

    fn check_movable(&self, id: NodeId) -> Result<(), DomError> {
        self.check_live(id)?;
        if id == self.root {
            return Err(DomError::RootMutation);
        }
        Ok(())
    }

    fn check_not_ancestor(&self, node: NodeId, of: NodeId) -> Result<(), DomError> {
        if self.is_ancestor_or_self(node, of) {
            Err(DomError::CycleDetected)
        } else {
            Ok(())
        }
    }
}

impl NodeStore for Document {
    type Handle = NodeId;

    fn node_type(&self, node: NodeId) -> Option<NodeType> {
        NodeStore::node_type(&self.arena, node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        NodeStore::parent(&self.arena, node)
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        NodeStore::first_child(&self.arena, node)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        NodeStore::next_sibling(&self.arena, node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    fn names(doc: &Document, parent: NodeId) -> Vec<String> {
        doc.children(parent)
            .map(|id| doc.name(id).or(doc.text(id)).unwrap_or("?").to_string())
            .collect()
    }

    #[test]
    fn test_new_document_has_document_node() {
        let doc = Document::new();
        assert_eq!(doc.kind(doc.root()), Some(&NodeKind::Document));
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.document_element(), None);
    }

    #[test]
    fn test_append_and_children() {
        let mut doc = Document::new();
        let html = doc.create_element("html");
        let body = doc.create_element("body");
        let text = doc.create_text("hi");
        doc.append(doc.root(), html).unwrap();
        doc.append(html, body).unwrap();
        doc.append(body, text).unwrap();

        assert_eq!(doc.document_element(), Some(html));
        assert_eq!(names(&doc, html), ["body"]);
        assert_eq!(names(&doc, body), ["hi"]);
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn test_insert_before_and_after() {
        let mut doc = Document::new();
        let root = doc.create_element("root");
        doc.append(doc.root(), root).unwrap();
        let b = doc.create_element("b");
        doc.append(root, b).unwrap();
        let a = doc.create_element("a");
        doc.insert_before(b, a).unwrap();
        let c = doc.create_element("c");
        doc.insert_after(b, c).unwrap();
        let first = doc.create_comment("first");
        doc.prepend(root, first).unwrap();

        assert_eq!(names(&doc, root), ["first", "a", "b", "c"]);
    }

    #[test]
    fn test_moving_detaches_from_old_parent() {
        let mut doc = Document::new();
        let root = doc.create_element("root");
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        doc.append(doc.root(), root).unwrap();
        doc.append(root, a).unwrap();
        doc.append(root, b).unwrap();

        doc.append(a, b).unwrap();
        assert_eq!(names(&doc, root), ["a"]);
        assert_eq!(names(&doc, a), ["b"]);
    }

    #[test]
    fn test_cycles_are_rejected() {
        let mut doc = Document::new();
        let root = doc.create_element("root");
        let a = doc.create_element("a");
        doc.append(doc.root(), root).unwrap();
        doc.append(root, a).unwrap();

        assert_eq!(doc.append(a, root), Err(DomError::CycleDetected));
        assert_eq!(doc.append(a, a), Err(DomError::CycleDetected));
        assert_eq!(doc.insert_before(a, root), Err(DomError::CycleDetected));
    }

    #[test]
    fn test_document_node_is_fixed() {
        let mut doc = Document::new();
        let root = doc.root();
        let e = doc.create_element("e");
        assert_eq!(doc.append(e, root), Err(DomError::RootMutation));
        assert_eq!(doc.remove(root), Err(DomError::RootMutation));
        assert_eq!(doc.detach(root), Err(DomError::RootMutation));
    }

    #[test]
    fn test_remove_kills_subtree() {
        let mut doc = Document::new();
        let root = doc.create_element("root");
        let a = doc.create_element("a");
        let x = doc.create_text("x");
        doc.append(doc.root(), root).unwrap();
        doc.append(root, a).unwrap();
        doc.append(a, x).unwrap();

        doc.remove(a).unwrap();
        assert!(!doc.is_live(a));
        assert!(!doc.is_live(x));
        assert_eq!(doc.get(x), None);
        assert_eq!(doc.remove(a), Err(DomError::NodeRemoved));
        assert_eq!(doc.append(root, a), Err(DomError::NodeRemoved));
        assert!(names(&doc, root).is_empty());
    }

    #[test]
    fn test_unwrap_keeps_children_in_place() {
        let mut doc = Document::new();
        let root = doc.create_element("root");
        doc.append(doc.root(), root).unwrap();
        let before = doc.create_text("before");
        let b = doc.create_element("b");
        let after = doc.create_text("after");
        doc.append(root, before).unwrap();
        doc.append(root, b).unwrap();
        doc.append(root, after).unwrap();
        let inner = doc.create_text("inner");
        let i = doc.create_element("i");
        doc.append(b, inner).unwrap();
        doc.append(b, i).unwrap();

        doc.unwrap(b).unwrap();
        assert!(!doc.is_live(b));
        assert!(doc.is_live(i));
        assert_eq!(names(&doc, root), ["before", "inner", "i", "after"]);
    }

    #[test]
    fn test_attributes_keep_order() {
        let mut doc = Document::new();
        let e = doc.create_element("e");
        assert!(doc.set_attr(e, "z", "1"));
        assert!(doc.set_attr(e, "a", "2"));
        let t = doc.create_text("t");
        assert!(!doc.set_attr(t, "a", "2"));

        let keys: Vec<_> = doc
            .get(e)
            .and_then(NodeData::element)
            .map(|elem| elem.attrs.keys().map(|k| k.to_string()).collect())
            .unwrap_or_default();
        assert_eq!(keys, ["z", "a"]);
        assert_eq!(doc.attr(e, "a"), Some("2"));
    }

    #[test]
    fn test_node_types() {
        let mut doc = Document::new();
        let cases = [
            (doc.create_element("e"), NodeType::Element),
            (doc.create_text("t"), NodeType::Text),
            (doc.create_cdata("c"), NodeType::CData),
            (doc.create_comment("c"), NodeType::Comment),
            (doc.create_pi("php", "echo"), NodeType::ProcessingInstruction),
            (doc.create_entity_ref("nbsp"), NodeType::EntityReference),
            (doc.create_doctype("html"), NodeType::DocumentType),
            (doc.create_dtd("note"), NodeType::Dtd),
            (doc.create_xinclude_start(), NodeType::XIncludeStart),
            (doc.create_xinclude_end(), NodeType::XIncludeEnd),
        ];
        for (id, ty) in cases {
            assert_eq!(NodeStore::node_type(&doc, id), Some(ty));
        }
    }
}
