//! The read-only view of a tree that the walker runs over.

use crate::node_type::NodeType;
use indextree::{Arena, Node, NodeId};
use std::fmt::Debug;

/// Link and type queries over a tree of nodes.
///
/// Every query must be O(1). Implementations report a handle that no longer
/// names a live node (removed, freed, or never valid) as having no type and
/// no links, rather than panicking.
pub trait NodeStore {
    /// Handle used to address nodes. Handles are plain values: the walker
    /// keeps them across calls and never borrows the store between steps.
    type Handle: Copy + Eq + Debug;

    /// Kind of `node`, or `None` if `node` is not live.
    fn node_type(&self, node: Self::Handle) -> Option<NodeType>;

    /// Parent of `node`, or `None` for a root or a detached node.
    fn parent(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// First child of `node` in document order.
    fn first_child(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// Next sibling of `node` in document order.
    fn next_sibling(&self, node: Self::Handle) -> Option<Self::Handle>;

    /// Whether `node` names a live node.
    fn is_live(&self, node: Self::Handle) -> bool {
        self.node_type(node).is_some()
    }

    /// Whether `ancestor` is `node` itself or one of its ancestors.
    ///
    /// Walks the parent chain, so this is O(depth); only used to validate a
    /// walk before it starts.
    fn is_ancestor_or_self(&self, ancestor: Self::Handle, node: Self::Handle) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }
}

/// Node payloads that know their own [`NodeType`].
pub trait Classify {
    /// Kind of this node.
    fn node_type(&self) -> NodeType;
}

#[inline]
fn live<T>(arena: &Arena<T>, id: NodeId) -> Option<&Node<T>> {
    arena.get(id).filter(|node| !node.is_removed())
}

impl<T: Classify> NodeStore for Arena<T> {
    type Handle = NodeId;

    fn node_type(&self, node: NodeId) -> Option<NodeType> {
        live(self, node).map(|n| n.get().node_type())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        live(self, node)?.parent()
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        live(self, node)?.first_child()
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        live(self, node)?.next_sibling()
    }
}

impl<S: NodeStore + ?Sized> NodeStore for &S {
    type Handle = S::Handle;

    fn node_type(&self, node: Self::Handle) -> Option<NodeType> {
        (**self).node_type(node)
    }

    fn parent(&self, node: Self::Handle) -> Option<Self::Handle> {
        (**self).parent(node)
    }

    fn first_child(&self, node: Self::Handle) -> Option<Self::Handle> {
        (**self).first_child(node)
    }

    fn next_sibling(&self, node: Self::Handle) -> Option<Self::Handle> {
        (**self).next_sibling(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_testhelpers::test;

    struct Kind(NodeType);

    impl Classify for Kind {
        fn node_type(&self) -> NodeType {
            self.0
        }
    }

    #[test]
    fn arena_reports_links() {
        let mut arena = Arena::new();
        let root = arena.new_node(Kind(NodeType::Element));
        let a = arena.new_node(Kind(NodeType::Element));
        let b = arena.new_node(Kind(NodeType::Text));
        root.append(a, &mut arena);
        root.append(b, &mut arena);

        assert_eq!(arena.first_child(root), Some(a));
        assert_eq!(arena.next_sibling(a), Some(b));
        assert_eq!(arena.next_sibling(b), None);
        assert_eq!(arena.parent(b), Some(root));
        assert_eq!(NodeStore::node_type(&arena, b), Some(NodeType::Text));
        assert!(arena.is_ancestor_or_self(root, b));
        assert!(arena.is_ancestor_or_self(b, b));
        assert!(!arena.is_ancestor_or_self(a, b));
    }

    #[test]
    fn removed_nodes_are_not_live() {
        let mut arena = Arena::new();
        let root = arena.new_node(Kind(NodeType::Element));
        let a = arena.new_node(Kind(NodeType::Element));
        let x = arena.new_node(Kind(NodeType::Text));
        root.append(a, &mut arena);
        a.append(x, &mut arena);

        a.remove_subtree(&mut arena);

        assert!(!arena.is_live(a));
        assert!(!arena.is_live(x));
        assert_eq!(NodeStore::node_type(&arena, x), None);
        assert_eq!(arena.parent(x), None);
        assert_eq!(arena.first_child(a), None);
        assert_eq!(arena.first_child(root), None);
    }

    #[test]
    fn detached_nodes_keep_their_children() {
        let mut arena = Arena::new();
        let root = arena.new_node(Kind(NodeType::Element));
        let a = arena.new_node(Kind(NodeType::Element));
        let x = arena.new_node(Kind(NodeType::Text));
        root.append(a, &mut arena);
        a.append(x, &mut arena);

        a.detach(&mut arena);

        assert!(arena.is_live(a));
        assert_eq!(arena.parent(a), None);
        assert_eq!(arena.first_child(a), Some(x));
        assert!(!arena.is_ancestor_or_self(root, x));
    }
}
