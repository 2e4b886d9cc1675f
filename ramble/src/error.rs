use facet::Facet;

/// Reasons a walk cannot be started.
#[derive(Facet, Debug, Clone, Copy, PartialEq, Eq)]
#[facet(derive(Error))]
#[repr(u8)]
pub enum WalkError {
    /// start node is not a live node
    StartNotLive,

    /// scope boundary is not a live node
    BoundaryNotLive,

    /// scope boundary is neither the start node nor one of its ancestors
    BoundaryNotAncestor,
}
