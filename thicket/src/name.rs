//! Node tests used to select nodes by tag or kind.

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::document::{NodeData, NodeKind};

/// A predicate over a node, as accepted by [`Document::iter`],
/// [`Document::strip_tags`] and [`Document::strip_elements`].
///
/// [`Document::iter`]: crate::Document::iter
/// [`Document::strip_tags`]: crate::Document::strip_tags
/// [`Document::strip_elements`]: crate::Document::strip_elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameTest {
    /// Any element (`*`).
    AnyElement,
    /// Elements with exactly this tag name.
    Name(CompactString),
    Comment,
    ProcessingInstruction,
    /// Entity references, whatever their name.
    EntityReference,
}

impl NameTest {
    pub fn matches(&self, data: &NodeData) -> bool {
        match (self, &data.kind) {
            (NameTest::AnyElement, NodeKind::Element(_)) => true,
            (NameTest::Name(name), NodeKind::Element(elem)) => elem.name == *name,
            (NameTest::Comment, NodeKind::Comment(_)) => true,
            (NameTest::ProcessingInstruction, NodeKind::ProcessingInstruction { .. }) => true,
            (NameTest::EntityReference, NodeKind::EntityReference(_)) => true,
            _ => false,
        }
    }
}

impl From<&str> for NameTest {
    fn from(name: &str) -> Self {
        if name == "*" {
            NameTest::AnyElement
        } else {
            NameTest::Name(name.into())
        }
    }
}

/// A set of tests; a node is selected if any of them matches.
#[derive(Debug, Clone, Default)]
pub(crate) struct NameTests(SmallVec<[NameTest; 4]>);

impl NameTests {
    pub(crate) fn new<I, T>(tests: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NameTest>,
    {
        NameTests(tests.into_iter().map(Into::into).collect())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn matches(&self, data: &NodeData) -> bool {
        self.0.iter().any(|test| test.matches(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementData;
    use facet_testhelpers::test;

    fn element(name: &str) -> NodeData {
        NodeData::new(NodeKind::Element(ElementData {
            name: name.into(),
            ..Default::default()
        }))
    }

    #[test]
    fn star_matches_elements_only() {
        let star = NameTest::from("*");
        assert_eq!(star, NameTest::AnyElement);
        assert!(star.matches(&element("a")));
        assert!(!star.matches(&NodeData::new(NodeKind::Comment("c".into()))));
    }

    #[test]
    fn names_match_exactly() {
        let test = NameTest::from("b");
        assert!(test.matches(&element("b")));
        assert!(!test.matches(&element("B")));
        assert!(!test.matches(&NodeData::new(NodeKind::EntityReference("b".into()))));
    }

    #[test]
    fn kind_tests() {
        let tests = NameTests::new([NameTest::Comment, NameTest::ProcessingInstruction]);
        assert!(tests.matches(&NodeData::new(NodeKind::Comment("c".into()))));
        assert!(tests.matches(&NodeData::new(NodeKind::ProcessingInstruction {
            target: "t".into(),
            data: "d".into(),
        })));
        assert!(!tests.matches(&element("c")));
        assert!(NameTests::new(Vec::<NameTest>::new()).is_empty());
    }
}
