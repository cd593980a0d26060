//! Arena-backed physical forest

use crate::tree::{Node, NodeId, Tree};
use smallvec::SmallVec;

/// Internal node storage
#[derive(Debug, Clone)]
struct Slot<D> {
    node: Node<D>,
    /// Non-owning back reference, `None` for roots
    parent: Option<NodeId>,
    /// Index within the parent's children (or within the root list)
    position: usize,
    children: SmallVec<[NodeId; 4]>,
}

/// An append-only, ordered forest stored in a single arena
///
/// Nodes are addressed by [`NodeId`] indices into the arena. Children are
/// index lists and the parent is an optional index, so there are no owning
/// cycles. Each node also remembers its position among its siblings, which
/// makes sibling lookups O(1).
///
/// # Example
///
/// ```
/// use filtered_tree::tree::{ArenaTree, Node, Tree};
///
/// let mut tree = ArenaTree::new();
/// let a = tree.add_root(Node::container("A", ()));
/// let b = tree.add_child(a, Node::leaf("B", ()));
/// assert_eq!(tree.parent(b), Some(a));
/// ```
#[derive(Debug, Clone)]
pub struct ArenaTree<D> {
    slots: Vec<Slot<D>>,
    roots: Vec<NodeId>,
}

impl<D> Default for ArenaTree<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> ArenaTree<D> {
    /// Create an empty forest
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Append a new physical root after the existing ones
    pub fn add_root(&mut self, node: Node<D>) -> NodeId {
        let id = NodeId::new(self.slots.len());
        self.slots.push(Slot {
            node,
            parent: None,
            position: self.roots.len(),
            children: SmallVec::new(),
        });
        self.roots.push(id);
        id
    }

    /// Append a new last child to `parent`
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add_child(&mut self, parent: NodeId, node: Node<D>) -> NodeId {
        let id = NodeId::new(self.slots.len());
        let position = match self.slots.get_mut(parent.get()) {
            Some(slot) => {
                slot.children.push(id);
                slot.children.len() - 1
            }
            None => panic!("{} is not a node of this tree", parent),
        };
        self.slots.push(Slot {
            node,
            parent: Some(parent),
            position,
            children: SmallVec::new(),
        });
        id
    }

    /// Mutable access to a node's payload
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<D>> {
        self.slots.get_mut(id.get()).map(|slot| &mut slot.node)
    }

    /// True when the forest holds no nodes
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<D> Tree for ArenaTree<D> {
    type NodeData = D;

    fn get(&self, id: NodeId) -> Option<&Node<D>> {
        self.slots.get(id.get()).map(|slot| &slot.node)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.get())?.parent
    }

    fn child_count(&self, id: NodeId) -> usize {
        self.slots
            .get(id.get())
            .map(|slot| slot.children.len())
            .unwrap_or(0)
    }

    fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.slots.get(id.get())?.children.get(index).copied()
    }

    fn root_count(&self) -> usize {
        self.roots.len()
    }

    fn root_at(&self, index: usize) -> Option<NodeId> {
        self.roots.get(index).copied()
    }

    fn node_count(&self) -> usize {
        self.slots.len()
    }

    fn sibling_index(&self, id: NodeId) -> Option<usize> {
        self.slots.get(id.get()).map(|slot| slot.position)
    }
}
