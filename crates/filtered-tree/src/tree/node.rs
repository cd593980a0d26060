//! Core node types for the physical tree

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a node within a tree
///
/// Internally an index into arena-based storage. Two ids are the same node
/// exactly when they are equal; node contents play no part in identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId from a usize
    pub const fn new(id: usize) -> Self {
        NodeId(id)
    }

    /// Get the inner usize value
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        NodeId(id)
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// The type/kind of a node in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    /// A node that may hold children (section, directory)
    Container,
    /// A node that never holds children (paragraph, file)
    Leaf,
}

impl NodeKind {
    /// Returns true if this is a container node
    pub const fn is_container(self) -> bool {
        matches!(self, NodeKind::Container)
    }

    /// Returns true if this is a leaf node
    pub const fn is_leaf(self) -> bool {
        matches!(self, NodeKind::Leaf)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Container => write!(f, "Container"),
            NodeKind::Leaf => write!(f, "Leaf"),
        }
    }
}

/// A single node payload in the physical tree
///
/// Generic over the data type `D`. Structure (parent, children) is held by
/// the tree, not by the node.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node<D> {
    /// Display name of the node
    pub name: String,
    /// Whether this is a container or leaf node
    pub kind: NodeKind,
    /// User-defined data associated with this node
    pub data: D,
}

impl<D> Node<D> {
    pub fn new(name: impl Into<String>, kind: NodeKind, data: D) -> Self {
        Self {
            name: name.into(),
            kind,
            data,
        }
    }

    pub fn container(name: impl Into<String>, data: D) -> Self {
        Self::new(name, NodeKind::Container, data)
    }

    pub fn leaf(name: impl Into<String>, data: D) -> Self {
        Self::new(name, NodeKind::Leaf, data)
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }
}

impl<D: Default> Node<D> {
    /// Create a new container node with default data
    pub fn container_default(name: impl Into<String>) -> Self {
        Self::container(name, D::default())
    }

    /// Create a new leaf node with default data
    pub fn leaf_default(name: impl Into<String>) -> Self {
        Self::leaf(name, D::default())
    }
}
