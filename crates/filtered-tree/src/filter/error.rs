use crate::tree::NodeId;
use derive_more::Display;

/// Contract violations reported by the filtered view
///
/// All of these are caller bugs. The navigator never retries or swallows
/// them and leaves nothing half-done, since every operation is a pure read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NavError {
    /// The node id does not resolve to a node of the tree (stale or foreign id)
    #[display(fmt = "{} does not resolve to a node of the tree", _0)]
    NullArgument(NodeId),

    /// The node exists but the filter excludes it
    #[display(fmt = "{} is not included by the filter", _0)]
    NodeNotIncluded(NodeId),

    /// A virtual child index past the end of the virtual children
    #[display(
        fmt = "child index {} out of bounds for {} with {} virtual children",
        index,
        node,
        count
    )]
    IndexOutOfBounds {
        node: NodeId,
        index: usize,
        count: usize,
    },
}

impl std::error::Error for NavError {}

pub type Result<T, E = NavError> = std::result::Result<T, E>;
