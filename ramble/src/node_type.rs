//! Node classification and the filters built on top of it.

use facet::Facet;

/// The kind of a node in an XML/HTML document tree.
///
/// This is the only thing the walker ever asks about a node besides its links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Facet)]
#[repr(u8)]
pub enum NodeType {
    /// The document node at the top of a tree.
    Document,
    /// An element (`<a>...</a>`).
    Element,
    /// Character data.
    Text,
    /// A `<![CDATA[...]]>` section.
    CData,
    /// A `<!-- ... -->` comment.
    Comment,
    /// A `<?target data?>` processing instruction.
    ProcessingInstruction,
    /// An unexpanded `&name;` reference. Its children, if any, belong to the
    /// entity declaration and are never walked.
    EntityReference,
    /// A `<!DOCTYPE ...>` node without an internal subset.
    DocumentType,
    /// A DTD with an internal subset. Its declarations are never walked.
    Dtd,
    /// Marker left where an XInclude expansion begins.
    XIncludeStart,
    /// Marker left where an XInclude expansion ends.
    XIncludeEnd,
}

impl NodeType {
    /// Element, comment, processing instruction or entity reference: the
    /// nodes an element-only walk stops on.
    #[inline]
    pub const fn is_element_like(self) -> bool {
        matches!(
            self,
            NodeType::Element
                | NodeType::Comment
                | NodeType::ProcessingInstruction
                | NodeType::EntityReference
        )
    }

    /// Element-like, or one of the two XInclude markers.
    #[inline]
    pub const fn is_element_or_xinclude(self) -> bool {
        self.is_element_like() || matches!(self, NodeType::XIncludeStart | NodeType::XIncludeEnd)
    }

    /// Entity references and DTDs may carry physical children that are not
    /// part of the document content.
    #[inline]
    pub const fn is_opaque(self) -> bool {
        matches!(self, NodeType::EntityReference | NodeType::Dtd)
    }

    /// Text or CDATA.
    #[inline]
    pub const fn is_textual(self) -> bool {
        matches!(self, NodeType::Text | NodeType::CData)
    }
}

/// Which nodes a walk stops on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Facet)]
#[repr(u8)]
pub enum WalkMode {
    /// Every live node, text included.
    AllNodes,
    /// Only element-like nodes (see [`NodeType::is_element_like`]).
    #[default]
    ElementLike,
    /// Element-like nodes plus XInclude start/end markers.
    ElementOrXInclude,
}

impl WalkMode {
    /// Whether a node of type `ty` is visited in this mode.
    ///
    /// `None` stands for a handle that no longer names a live node, which
    /// never matches.
    #[inline]
    pub fn matches(self, ty: Option<NodeType>) -> bool {
        let Some(ty) = ty else {
            return false;
        };
        match self {
            WalkMode::AllNodes => true,
            WalkMode::ElementLike => ty.is_element_like(),
            WalkMode::ElementOrXInclude => ty.is_element_or_xinclude(),
        }
    }
}
