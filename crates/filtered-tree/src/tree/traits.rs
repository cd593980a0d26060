//! Physical tree capability set

use crate::tree::{Node, NodeId};

/// An ordered, rooted forest of nodes addressed by [`NodeId`]
///
/// This is the minimal capability set a filtered view needs. Implementations
/// provide parent/child access and the ordered list of physical roots; the
/// sibling relations and the other helpers are derived from those.
///
/// The roots of a forest are ordered and are treated as physical siblings of
/// each other, so walking "next sibling" off the end of one tree continues at
/// the next root.
///
/// Implementations must describe an acyclic, finite structure. Nothing here
/// checks that.
///
/// # Example
///
/// ```ignore
/// fn print_tree<T: Tree>(tree: &T) {
///     for id in tree.walk() {
///         let node = tree.get(id).unwrap();
///         println!("{:indent$}{}", "", node.name, indent = tree.depth(id) * 2);
///     }
/// }
/// ```
pub trait Tree {
    /// User-defined data stored at each node
    type NodeData;

    /// Get a node by its ID
    ///
    /// Returns `None` if the ID is invalid.
    fn get(&self, id: NodeId) -> Option<&Node<Self::NodeData>>;

    /// Get the physical parent of a node
    ///
    /// Returns `None` for roots and invalid IDs.
    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Number of physical children of a node (0 for invalid IDs)
    fn child_count(&self, id: NodeId) -> usize;

    /// Physical child at `index`, `None` when out of bounds
    fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId>;

    /// Number of physical roots
    fn root_count(&self) -> usize;

    /// Physical root at `index`, `None` when out of bounds
    fn root_at(&self, index: usize) -> Option<NodeId>;

    /// Count total nodes in the tree
    fn node_count(&self) -> usize;

    /// Check whether the ID resolves to a node
    fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Position of a node among its physical siblings (or among the roots)
    ///
    /// Linear in the number of siblings. Arena implementations that know the
    /// position should override this.
    fn sibling_index(&self, id: NodeId) -> Option<usize> {
        match self.parent(id) {
            Some(parent) => {
                (0..self.child_count(parent)).find(|&i| self.child_at(parent, i) == Some(id))
            }
            None => (0..self.root_count()).find(|&i| self.root_at(i) == Some(id)),
        }
    }

    /// Physical previous sibling
    fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let index = self.sibling_index(id)?.checked_sub(1)?;
        match self.parent(id) {
            Some(parent) => self.child_at(parent, index),
            None => self.root_at(index),
        }
    }

    /// Physical next sibling
    fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let index = self.sibling_index(id)? + 1;
        match self.parent(id) {
            Some(parent) => self.child_at(parent, index),
            None => self.root_at(index),
        }
    }

    /// Iterate over physical children of a node
    fn children(&self, id: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new((0..self.child_count(id)).filter_map(move |i| self.child_at(id, i)))
    }

    /// Iterate over the physical roots
    fn roots(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new((0..self.root_count()).filter_map(move |i| self.root_at(i)))
    }

    /// Get the depth of a node (root = 0)
    ///
    /// Returns 0 for invalid IDs.
    fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent_id) = current {
            depth += 1;
            current = self.parent(parent_id);
        }
        depth
    }

    /// Get all ancestors of a node, from parent to root
    fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent_id) = current {
            ancestors.push(parent_id);
            current = self.parent(parent_id);
        }
        ancestors
    }

    /// Check if a node is a strict ancestor of another
    fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        let mut current = self.parent(descendant);
        while let Some(parent_id) = current {
            if parent_id == ancestor {
                return true;
            }
            current = self.parent(parent_id);
        }
        false
    }

    /// Walk the whole forest in physical pre-order
    fn walk(&self) -> PreOrder<'_, Self>
    where
        Self: Sized,
    {
        PreOrder::forest(self)
    }

    /// Walk the physical subtree rooted at `start` in pre-order
    fn walk_from(&self, start: NodeId) -> PreOrder<'_, Self>
    where
        Self: Sized,
    {
        PreOrder::new(self, start)
    }

    /// Find the first node (pre-order) with the given name
    fn find_by_name(&self, name: &str) -> Option<NodeId>
    where
        Self: Sized,
    {
        self.walk()
            .find(|&id| self.get(id).map(|n| n.name == name).unwrap_or(false))
    }
}

/// Physical pre-order iterator driven by an explicit stack
pub struct PreOrder<'a, T: Tree + ?Sized> {
    tree: &'a T,
    stack: Vec<NodeId>,
}

impl<'a, T: Tree + ?Sized> PreOrder<'a, T> {
    /// Pre-order over the subtree rooted at `start`
    pub fn new(tree: &'a T, start: NodeId) -> Self {
        let stack = if tree.contains(start) { vec![start] } else { Vec::new() };
        Self { tree, stack }
    }

    /// Pre-order over every tree of the forest, roots in order
    pub fn forest(tree: &'a T) -> Self {
        let mut stack: Vec<_> = tree.roots().collect();
        stack.reverse();
        Self { tree, stack }
    }

    /// The tree being walked
    pub fn tree(&self) -> &'a T {
        self.tree
    }
}

impl<T: Tree + ?Sized> Clone for PreOrder<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
        }
    }
}

impl<T: Tree + ?Sized> Iterator for PreOrder<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;

        // Add children in reverse order so they're popped in correct order
        for index in (0..self.tree.child_count(current)).rev() {
            if let Some(child) = self.tree.child_at(current, index) {
                self.stack.push(child);
            }
        }

        Some(current)
    }
}
