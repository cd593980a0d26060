//! Read-only navigation over the filtered view of a physical tree

use crate::filter::scan::{deepest_last, Direction, SubForest, VirtualChildren};
use crate::filter::{InclusionPredicate, NavError, Result};
use crate::tree::{node_name, render, NodeId, PreOrder, Tree};
use log::trace;

/// Answers navigation queries about the filtered view of a tree
///
/// The view contains exactly the nodes accepted by the predicate, in
/// physical pre-order. A node's virtual parent is its nearest included
/// ancestor; its virtual children are found by scanning its physical
/// children, keeping the included ones and replacing each excluded one by
/// that node's own scan.
///
/// Nothing is cached. The tree is passed to every call and re-walked on
/// demand, so changes made to it between calls are observed by the next
/// call. Navigation queries cost time proportional to the distance walked in
/// the physical tree, which suits node-at-a-time navigation. Bulk enumeration
/// should go through [`Navigator::subforest`] or [`Navigator::iter`].
///
/// Unless noted otherwise, operations require their node argument to resolve
/// in the tree ([`NavError::NullArgument`]) and to be included by the
/// predicate ([`NavError::NodeNotIncluded`]).
///
/// # Example
///
/// ```
/// use filtered_tree::filter::{node, Navigator};
/// use filtered_tree::tree::{ArenaTree, Node, Tree};
///
/// let tree: ArenaTree<()> = ArenaTree::parse_outline("A(B(D,E),C)").unwrap();
/// let nav = Navigator::new(node(|n: &Node<()>| n.name != "B"));
///
/// let a = tree.find_by_name("A").unwrap();
/// let d = tree.find_by_name("D").unwrap();
/// assert_eq!(nav.child(&tree, a, 0).unwrap(), d);
/// assert_eq!(nav.parent(&tree, d).unwrap(), Some(a));
/// assert_eq!(nav.outline(&tree), "A(D,E,C)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Navigator<P> {
    predicate: P,
}

impl<P> Navigator<P> {
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    pub fn into_predicate(self) -> P {
        self.predicate
    }

    /// Membership test; `false` for ids that do not resolve
    pub fn is_included<T>(&self, tree: &T, id: NodeId) -> bool
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        tree.contains(id) && self.predicate.is_included(tree, id)
    }

    fn resolve<T>(&self, tree: &T, id: NodeId) -> Result<()>
    where
        T: Tree + ?Sized,
    {
        if tree.contains(id) {
            Ok(())
        } else {
            Err(NavError::NullArgument(id))
        }
    }

    fn require<T>(&self, tree: &T, id: NodeId) -> Result<()>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        self.resolve(tree, id)?;
        if self.predicate.is_included(tree, id) {
            Ok(())
        } else {
            Err(NavError::NodeNotIncluded(id))
        }
    }

    /// Nearest included physical ancestor
    ///
    /// `None` means the node is a root of the virtual forest.
    pub fn parent<T>(&self, tree: &T, id: NodeId) -> Result<Option<NodeId>>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        self.require(tree, id)?;
        let mut current = tree.parent(id);
        while let Some(ancestor) = current {
            if self.predicate.is_included(tree, ancestor) {
                return Ok(Some(ancestor));
            }
            current = tree.parent(ancestor);
        }
        Ok(None)
    }

    /// Lazy scan over the virtual children, left to right
    pub fn children<'a, T>(&'a self, tree: &'a T, id: NodeId) -> Result<VirtualChildren<'a, T, P>>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        self.require(tree, id)?;
        Ok(VirtualChildren::new(
            tree,
            &self.predicate,
            Some(id),
            Direction::Forward,
        ))
    }

    /// Number of virtual children (full scan)
    pub fn child_count<T>(&self, tree: &T, id: NodeId) -> Result<usize>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        Ok(self.children(tree, id)?.count())
    }

    /// Virtual child at `index`, scanning no further than needed
    pub fn child<T>(&self, tree: &T, id: NodeId, index: usize) -> Result<NodeId>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        let mut count = 0;
        for child in self.children(tree, id)? {
            if count == index {
                return Ok(child);
            }
            count += 1;
        }
        Err(NavError::IndexOutOfBounds {
            node: id,
            index,
            count,
        })
    }

    /// Position among the virtual siblings, `None` for virtual forest roots
    pub fn index_of<T>(&self, tree: &T, id: NodeId) -> Result<Option<usize>>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        let Some(parent) = self.parent(tree, id)? else {
            return Ok(None);
        };
        self.children(tree, parent)?
            .position(|child| child == id)
            .map(Some)
            .ok_or(NavError::NodeNotIncluded(id))
    }

    pub fn previous_sibling<T>(&self, tree: &T, id: NodeId) -> Result<Option<NodeId>>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        self.sibling(tree, id, Direction::Backward)
    }

    pub fn next_sibling<T>(&self, tree: &T, id: NodeId) -> Result<Option<NodeId>>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        self.sibling(tree, id, Direction::Forward)
    }

    fn sibling<T>(&self, tree: &T, id: NodeId, direction: Direction) -> Result<Option<NodeId>>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        self.require(tree, id)?;

        let mut current = id;
        loop {
            let mut candidate = direction.sibling(tree, current);
            while let Some(sibling) = candidate {
                if self.predicate.is_included(tree, sibling) {
                    return Ok(Some(sibling));
                }
                // Nearest virtual child of the excluded sibling on our side
                let nearest =
                    VirtualChildren::new(tree, &self.predicate, Some(sibling), direction).next();
                if nearest.is_some() {
                    return Ok(nearest);
                }
                candidate = direction.sibling(tree, sibling);
            }

            // An included parent bounds the search
            match tree.parent(current) {
                Some(parent) if !self.predicate.is_included(tree, parent) => {
                    trace!("sibling search for {} climbs to {}", id, parent);
                    current = parent;
                }
                _ => return Ok(None),
            }
        }
    }

    /// Document-order predecessor among included nodes
    ///
    /// The input node must itself be included.
    pub fn previous<T>(&self, tree: &T, id: NodeId) -> Result<Option<NodeId>>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        self.require(tree, id)?;
        Ok(self.walk_until_included(tree, id, Direction::Backward))
    }

    /// Document-order successor among included nodes
    ///
    /// The input node must itself be included.
    pub fn next<T>(&self, tree: &T, id: NodeId) -> Result<Option<NodeId>>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        self.require(tree, id)?;
        Ok(self.walk_until_included(tree, id, Direction::Forward))
    }

    fn walk_until_included<T>(&self, tree: &T, id: NodeId, direction: Direction) -> Option<NodeId>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        let mut current = id;
        let mut steps = 0usize;
        while let Some(step) = direction.step(tree, current) {
            steps += 1;
            if self.predicate.is_included(tree, step) {
                trace!("{:?} from {} reached {} after {} steps", direction, id, step, steps);
                return Some(step);
            }
            current = step;
        }
        trace!("{:?} from {} ran off the forest after {} steps", direction, id, steps);
        None
    }

    /// Every included node of the physical subtree rooted at `id`, in pre-order
    ///
    /// `id` itself comes first when it is included; it need not be. Fails only
    /// with [`NavError::NullArgument`].
    pub fn subforest<'a, T>(&'a self, tree: &'a T, id: NodeId) -> Result<SubForest<'a, T, P>>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        self.resolve(tree, id)?;
        Ok(SubForest::new(PreOrder::new(tree, id), &self.predicate))
    }

    /// Every included node of the whole forest, in pre-order
    pub fn iter<'a, T>(&'a self, tree: &'a T) -> SubForest<'a, T, P>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        SubForest::new(PreOrder::forest(tree), &self.predicate)
    }

    /// Roots of the virtual forest, left to right
    pub fn roots<'a, T>(&'a self, tree: &'a T) -> VirtualChildren<'a, T, P>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        VirtualChildren::new(tree, &self.predicate, None, Direction::Forward)
    }

    /// First included node in document order
    pub fn first<T>(&self, tree: &T) -> Option<NodeId>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        self.roots(tree).next()
    }

    /// Last included node in document order
    pub fn last<T>(&self, tree: &T) -> Option<NodeId>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        let last_root = tree.root_at(tree.root_count().checked_sub(1)?)?;
        let last = deepest_last(tree, last_root);
        if self.predicate.is_included(tree, last) {
            Some(last)
        } else {
            self.walk_until_included(tree, last, Direction::Backward)
        }
    }

    /// Virtual ancestors from the virtual parent up to the virtual root
    pub fn ancestors<T>(&self, tree: &T, id: NodeId) -> Result<Vec<NodeId>>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        self.require(tree, id)?;
        Ok(tree
            .ancestors(id)
            .into_iter()
            .filter(|&ancestor| self.predicate.is_included(tree, ancestor))
            .collect())
    }

    /// Depth in the virtual forest (virtual roots are at 0)
    pub fn depth<T>(&self, tree: &T, id: NodeId) -> Result<usize>
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        Ok(self.ancestors(tree, id)?.len())
    }

    /// Render the virtual forest in outline notation
    pub fn outline<T>(&self, tree: &T) -> String
    where
        T: Tree + ?Sized,
        P: InclusionPredicate<T>,
    {
        render(
            self.roots(tree).collect(),
            |id| node_name(tree, id),
            |id| {
                VirtualChildren::new(tree, &self.predicate, Some(id), Direction::Forward).collect()
            },
        )
    }
}
