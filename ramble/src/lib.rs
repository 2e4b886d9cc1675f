//! # Ramble
//!
//! Depth-first, document-order walks over XML/HTML node trees that the caller
//! is allowed to restructure while the walk is in progress.
//!
//! ## Model
//!
//! The walker only needs four O(1) queries from the tree, expressed by
//! [`NodeStore`]: a node's [`NodeType`], its parent, its first child and its
//! next sibling. Any [`indextree::Arena`] whose payload implements
//! [`Classify`] is a store out of the box.
//!
//! A walk is a [`Cursor`]: a handful of handles and flags, created by
//! [`Cursor::begin`] and stepped with [`Cursor::advance`]. Every step reads the
//! links that exist *at that moment*, starting from the node returned by the
//! previous step, so the caller can add, remove or move nodes between steps.
//!
//! ## Variants
//!
//! - [`WalkMode::AllNodes`] visits everything, text included;
//!   [`WalkMode::ElementLike`] stops only on elements, comments, processing
//!   instructions and entity references; [`WalkMode::ElementOrXInclude`]
//!   also stops on XInclude markers.
//! - An inclusive walk emits its start node first; an exclusive one begins
//!   with whatever follows it.
//! - The scope boundary is an ancestor (or the start itself) that the walk
//!   never climbs to.
//!
//! Entity references and DTDs are never descended into, whatever the mode.
//!
//! ## Usage
//!
//! ```
//! use ramble::{Classify, Cursor, NodeType, WalkMode};
//! use ramble::indextree::Arena;
//!
//! struct Kind(NodeType);
//!
//! impl Classify for Kind {
//!     fn node_type(&self) -> NodeType {
//!         self.0
//!     }
//! }
//!
//! let mut arena = Arena::new();
//! let root = arena.new_node(Kind(NodeType::Element));
//! let text = arena.new_node(Kind(NodeType::Text));
//! let child = arena.new_node(Kind(NodeType::Element));
//! root.append(text, &mut arena);
//! root.append(child, &mut arena);
//!
//! let mut cursor = Cursor::begin(&arena, root, Some(root), true, WalkMode::ElementLike).unwrap();
//! let mut seen = Vec::new();
//! while let Some(node) = cursor.advance(&arena) {
//!     seen.push(node);
//!     // the arena may be mutated here
//! }
//! assert_eq!(seen, [root, child]);
//! ```

#![warn(missing_docs)]

pub use indextree;

mod tracing_macros;
#[allow(unused_imports)]
pub(crate) use tracing_macros::{debug, trace};

mod error;
mod node_type;
mod store;
mod walker;

pub use error::WalkError;
pub use node_type::{NodeType, WalkMode};
pub use store::{Classify, NodeStore};
pub use walker::{Cursor, Walk, walk};
