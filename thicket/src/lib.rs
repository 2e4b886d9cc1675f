//! XML/HTML node trees you can edit while walking them.
//!
//! thicket provides:
//! - **Arena document**: [`Document`], an `indextree` arena of elements, text,
//!   CDATA, comments, processing instructions, entity references, DTDs and
//!   XInclude markers, with structural edits (append, insert, detach,
//!   remove, unwrap)
//! - **Mutation-tolerant walks**: [`Document::for_each_mut`] drives a
//!   [`ramble::Cursor`] and hands the visitor the document mutably between
//!   steps
//! - **Selection**: [`Document::iter`] by tag name or node kind,
//!   [`Document::iter_text`] for character content
//! - **Cleanup**: [`Document::strip_tags`] and [`Document::strip_elements`],
//!   which edit the tree in the middle of their own walk
//!
//! # Example
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use thicket::{Document, WalkMode};
//!
//! let mut doc = Document::new();
//! let body = doc.build(|b| {
//!     b.element("body", |b| {
//!         b.element("script", |b| {
//!             b.text("alert(1)");
//!         });
//!         b.element("p", |b| {
//!             b.text("Hello!");
//!         });
//!     })
//! });
//!
//! // Drop every <script> as we meet it.
//! let mut doomed = None;
//! doc.for_each_mut(body, Some(body), false, WalkMode::ElementLike, |doc, node, cursor| {
//!     if let Some(old) = doomed.take() {
//!         doc.remove(old).unwrap();
//!     }
//!     if doc.name(node) == Some("script") {
//!         cursor.skip_subtree();
//!         doomed = Some(node);
//!     }
//!     ControlFlow::Continue(())
//! })
//! .unwrap();
//!
//! assert_eq!(doc.iter_text(body).unwrap().collect::<String>(), "Hello!");
//! ```

mod tracing_macros;
#[allow(unused_imports)]
pub(crate) use tracing_macros::{debug, trace};

mod builder;
mod document;
mod dump;
mod iter;
mod name;
mod strip;
mod visit;

pub use builder::TreeBuilder;
pub use document::{Document, DomError, ElementData, NodeData, NodeKind};
pub use dump::Dump;
pub use iter::{Iter, IterText};
pub use name::NameTest;

// Re-export the walker types so callers need only one dependency
pub use ramble::indextree::NodeId;
pub use ramble::{Cursor, NodeStore, NodeType, WalkError, WalkMode};
