//! The step engine.
//!
//! A [`Cursor`] is an external iterator: the caller asks for one node at a
//! time and may restructure the tree between calls. Each step is computed
//! from the links that exist at the moment [`Cursor::advance`] is called,
//! starting from the node emitted by the previous call, so edits made by the
//! visitor in the meantime are observed rather than stepped over.
//!
//! Detaching or removing the node that was just emitted is *not* safe in the
//! sense of "the walk continues where you expect": the next step starts from
//! that node, finds no parent, and ends (or wanders into whatever subtree the
//! node still holds). It never panics and never reads a freed payload, but the
//! resulting order is unspecified. Call [`Cursor::skip_subtree`] before
//! detaching the current node, or remove it only after the next `advance`.

use crate::error::WalkError;
use crate::node_type::{NodeType, WalkMode};
use crate::store::NodeStore;
use crate::trace;
use std::fmt::Debug;
use std::iter::FusedIterator;

/// Resumable position of a depth-first walk.
///
/// Holds handles only; the store is passed to every call so the caller is
/// free to mutate it between steps.
#[derive(Debug, Clone)]
pub struct Cursor<H> {
    current: Option<H>,
    boundary: Option<H>,
    mode: WalkMode,
    inclusive: bool,
    started: bool,
    skip_children: bool,
}

impl<H: Copy + Eq + Debug> Cursor<H> {
    /// Prepare a walk from `start` in document order.
    ///
    /// `boundary` must be `start` or one of its ancestors; the walk never
    /// climbs to it or above it. `None` means the walk may climb all the way
    /// to the root. With `inclusive`, `start` itself is the first node
    /// emitted (if it matches `mode`).
    ///
    /// The usual shapes, in terms of some node `n`:
    /// - `begin(n, Some(n), true, ..)`: `n` and its descendants.
    /// - `begin(n, Some(n), false, ..)`: only the descendants.
    /// - `begin(first_child, Some(n), true, ..)`: the descendants, the same
    ///   nodes as above starting from a child handle.
    /// - `begin(n, parent(n), true, ..)`: `n`, its descendants, then its
    ///   following siblings and their descendants.
    pub fn begin<S>(
        store: &S,
        start: H,
        boundary: Option<H>,
        inclusive: bool,
        mode: WalkMode,
    ) -> Result<Self, WalkError>
    where
        S: NodeStore<Handle = H> + ?Sized,
    {
        if !store.is_live(start) {
            return Err(WalkError::StartNotLive);
        }
        if let Some(boundary) = boundary {
            if !store.is_live(boundary) {
                return Err(WalkError::BoundaryNotLive);
            }
            if !store.is_ancestor_or_self(boundary, start) {
                return Err(WalkError::BoundaryNotAncestor);
            }
        }

        trace!(?start, ?boundary, inclusive, ?mode, "begin walk");

        Ok(Cursor {
            current: Some(start),
            boundary,
            mode,
            inclusive,
            started: false,
            skip_children: false,
        })
    }

    /// Move to the next matching node and return it, or `None` once the walk
    /// is exhausted. Exhaustion is final: every later call returns `None`.
    pub fn advance<S>(&mut self, store: &S) -> Option<H>
    where
        S: NodeStore<Handle = H> + ?Sized,
    {
        let node = self.current?;
        self.current = if self.started {
            let skip_children = std::mem::take(&mut self.skip_children);
            self.step(store, node, skip_children)
        } else {
            self.started = true;
            self.first(store, node)
        };
        trace!(from = ?node, to = ?self.current, "advance");
        self.current
    }

    /// Do not descend into the children of the node most recently returned
    /// by [`advance`](Self::advance). The flag is consumed by the next step.
    ///
    /// Has no effect before the first node is emitted or after exhaustion.
    pub fn skip_subtree(&mut self) {
        if self.started && self.current.is_some() {
            self.skip_children = true;
        }
    }

    /// The node most recently emitted, or the start node before the first
    /// step.
    pub fn current(&self) -> Option<H> {
        self.current
    }

    /// Whether the walk has ended.
    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// Whether the first node has been emitted yet.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// The node the walk never climbs to.
    pub fn boundary(&self) -> Option<H> {
        self.boundary
    }

    /// Which nodes this walk stops on.
    pub fn mode(&self) -> WalkMode {
        self.mode
    }

    /// Turn the cursor into an iterator over a store that stays borrowed for
    /// the whole walk. Use the cursor directly when the tree must be mutated
    /// between steps.
    pub fn walk<S>(self, store: &S) -> Walk<'_, S>
    where
        S: NodeStore<Handle = H> + ?Sized,
    {
        Walk {
            store,
            cursor: self,
        }
    }

    fn first<S>(&self, store: &S, start: H) -> Option<H>
    where
        S: NodeStore<Handle = H> + ?Sized,
    {
        if !self.mode.matches(store.node_type(start)) {
            // the start node is skipped, so `inclusive` does not matter
            if Some(start) == self.boundary {
                trace!(?start, "start is a non-matching boundary, nothing to walk");
                return None;
            }
            return self.next_match(store, store.next_sibling(start));
        }
        if self.inclusive {
            Some(start)
        } else {
            self.step(store, start, false)
        }
    }

    fn step<S>(&self, store: &S, node: H, skip_children: bool) -> Option<H>
    where
        S: NodeStore<Handle = H> + ?Sized,
    {
        let mut next = None;

        if !skip_children && !store.node_type(node).is_some_and(NodeType::is_opaque) {
            next = self.next_match(store, store.first_child(node));
        }

        if next.is_none() && Some(node) != self.boundary {
            next = self.next_match(store, store.next_sibling(node));

            // back off through the parents; their own subtrees are done
            let mut ancestor = node;
            while next.is_none() {
                let Some(parent) = store.parent(ancestor) else {
                    break;
                };
                if Some(parent) == self.boundary {
                    break;
                }
                if !self.mode.matches(store.node_type(parent)) {
                    trace!(?parent, "ancestor outside the walk filter, stopping");
                    break;
                }
                ancestor = parent;
                next = self.next_match(store, store.next_sibling(parent));
            }
        }

        next
    }

    fn next_match<S>(&self, store: &S, mut node: Option<H>) -> Option<H>
    where
        S: NodeStore<Handle = H> + ?Sized,
    {
        while let Some(n) = node {
            if self.mode.matches(store.node_type(n)) {
                break;
            }
            node = store.next_sibling(n);
        }
        node
    }
}

/// Iterator over a walk whose store stays borrowed.
pub struct Walk<'s, S: NodeStore + ?Sized> {
    store: &'s S,
    cursor: Cursor<S::Handle>,
}

impl<S: NodeStore + ?Sized> Walk<'_, S> {
    /// The underlying cursor.
    pub fn cursor(&self) -> &Cursor<S::Handle> {
        &self.cursor
    }

    /// See [`Cursor::skip_subtree`].
    pub fn skip_subtree(&mut self) {
        self.cursor.skip_subtree();
    }
}

impl<S: NodeStore + ?Sized> Iterator for Walk<'_, S> {
    type Item = S::Handle;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.advance(self.store)
    }
}

impl<S: NodeStore + ?Sized> FusedIterator for Walk<'_, S> {}

/// Start a read-only walk. See [`Cursor::begin`] for the parameters.
pub fn walk<S>(
    store: &S,
    start: S::Handle,
    boundary: Option<S::Handle>,
    inclusive: bool,
    mode: WalkMode,
) -> Result<Walk<'_, S>, WalkError>
where
    S: NodeStore + ?Sized,
{
    Ok(Cursor::begin(store, start, boundary, inclusive, mode)?.walk(store))
}
