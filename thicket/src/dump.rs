//! Tree pretty-printing for debugging and test failure messages.
//!
//! This is not serialization: the output is an indented outline, one node per
//! line, meant for humans.

use std::fmt;

use ramble::indextree::NodeId;

use crate::document::{Document, NodeKind};

/// Helper for pretty-printing a subtree. Created by [`Document::dump`].
pub struct Dump<'a> {
    doc: &'a Document,
    node: NodeId,
    ids: bool,
}

impl Document {
    /// Outline of `node` and everything below it.
    pub fn dump(&self, node: NodeId) -> Dump<'_> {
        Dump {
            doc: self,
            node,
            ids: false,
        }
    }

    /// Log the whole tree at debug level.
    #[allow(dead_code)]
    pub(crate) fn debug_print_tree(&self, _title: &str) {
        crate::debug!(
            "=== {} ===\n{}",
            _title,
            Dump {
                doc: self,
                node: self.root,
                ids: true,
            }
        );
    }
}

impl Dump<'_> {
    /// Prefix every line with a short node label (`[n3]`).
    pub fn with_ids(mut self) -> Self {
        self.ids = true;
        self
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, node: NodeId, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let prefix = if self.ids {
            format!("{indent}[{}] ", node_id_short(node))
        } else {
            indent
        };

        let Some(kind) = self.doc.kind(node) else {
            return writeln!(f, "{prefix}<removed>");
        };

        match kind {
            NodeKind::Document => writeln!(f, "{prefix}#document")?,
            NodeKind::Element(elem) => {
                write!(f, "{prefix}<{}", elem.name)?;
                for (name, value) in &elem.attrs {
                    write!(f, " {name}={:?}", value.as_str())?;
                }
                writeln!(f, ">")?;
                self.fmt_children(f, node, depth)?;
                return writeln!(f, "{prefix}</{}>", elem.name);
            }
            NodeKind::Text(text) => writeln!(f, "{prefix}TEXT: {:?}", text.as_str())?,
            NodeKind::CData(text) => writeln!(f, "{prefix}CDATA: {:?}", text.as_str())?,
            NodeKind::Comment(text) => writeln!(f, "{prefix}COMMENT: {:?}", text.as_str())?,
            NodeKind::ProcessingInstruction { target, data } => {
                writeln!(f, "{prefix}PI: {target} {:?}", data.as_str())?
            }
            NodeKind::EntityReference(name) => writeln!(f, "{prefix}&{name};")?,
            NodeKind::DocumentType(name) => writeln!(f, "{prefix}DOCTYPE: {name}")?,
            NodeKind::Dtd(name) => writeln!(f, "{prefix}DTD: {name}")?,
            NodeKind::XIncludeStart => writeln!(f, "{prefix}XINCLUDE START")?,
            NodeKind::XIncludeEnd => writeln!(f, "{prefix}XINCLUDE END")?,
        }
        // entity expansions and DTD declarations are shown too
        self.fmt_children(f, node, depth)
    }

    fn fmt_children(&self, f: &mut fmt::Formatter<'_>, node: NodeId, depth: usize) -> fmt::Result {
        for child in self.doc.children(node) {
            self.fmt_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.node, 0)
    }
}

impl fmt::Debug for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Extract short node label like "n1" from NodeId debug output.
fn node_id_short(node_id: NodeId) -> String {
    let debug = format!("{:?}", node_id);
    let Some(start) = debug.find("index1: ") else {
        return debug;
    };
    let digits = &debug[start + "index1: ".len()..];
    let value: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    if value.is_empty() {
        debug
    } else {
        format!("n{}", value)
    }
}
