//! Lazy scans over the filtered view

use crate::filter::InclusionPredicate;
use crate::tree::{NodeId, PreOrder, Tree};

/// Direction of a sibling or document-order walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Adjacent physical sibling (roots count as siblings of each other)
    pub(crate) fn sibling<T: Tree + ?Sized>(self, tree: &T, id: NodeId) -> Option<NodeId> {
        match self {
            Direction::Forward => tree.next_sibling(id),
            Direction::Backward => tree.previous_sibling(id),
        }
    }

    /// Unfiltered pre-order successor or predecessor
    pub(crate) fn step<T: Tree + ?Sized>(self, tree: &T, id: NodeId) -> Option<NodeId> {
        match self {
            Direction::Forward => {
                if let Some(first) = tree.child_at(id, 0) {
                    return Some(first);
                }
                let mut current = id;
                loop {
                    if let Some(next) = tree.next_sibling(current) {
                        return Some(next);
                    }
                    current = tree.parent(current)?;
                }
            }
            Direction::Backward => match tree.previous_sibling(id) {
                Some(sibling) => Some(deepest_last(tree, sibling)),
                None => tree.parent(id),
            },
        }
    }
}

/// Last node of the physical subtree rooted at `id` in pre-order
pub(crate) fn deepest_last<T: Tree + ?Sized>(tree: &T, id: NodeId) -> NodeId {
    let mut current = id;
    while let Some(last) = tree
        .child_count(current)
        .checked_sub(1)
        .and_then(|index| tree.child_at(current, index))
    {
        current = last;
    }
    current
}

/// `None` stands for the list of physical roots
fn physical_len<T: Tree + ?Sized>(tree: &T, parent: Option<NodeId>) -> usize {
    match parent {
        Some(id) => tree.child_count(id),
        None => tree.root_count(),
    }
}

fn physical_at<T: Tree + ?Sized>(tree: &T, parent: Option<NodeId>, index: usize) -> Option<NodeId> {
    match parent {
        Some(id) => tree.child_at(id, index),
        None => tree.root_at(index),
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    parent: Option<NodeId>,
    front: usize,
    back: usize,
}

impl Frame {
    fn new<T: Tree + ?Sized>(tree: &T, parent: Option<NodeId>) -> Self {
        Self {
            parent,
            front: 0,
            back: physical_len(tree, parent),
        }
    }
}

/// Skip-and-descend scan yielding the virtual children of a node
///
/// An included physical child is yielded and not descended into. An
/// excluded one is replaced, in place, by its own scan. The work stack holds
/// one frame per excluded level currently being expanded.
pub struct VirtualChildren<'a, T: ?Sized, P> {
    tree: &'a T,
    predicate: &'a P,
    frames: Vec<Frame>,
    direction: Direction,
}

impl<'a, T: Tree + ?Sized, P> VirtualChildren<'a, T, P> {
    pub(crate) fn new(
        tree: &'a T,
        predicate: &'a P,
        parent: Option<NodeId>,
        direction: Direction,
    ) -> Self {
        Self {
            tree,
            predicate,
            frames: vec![Frame::new(tree, parent)],
            direction,
        }
    }
}

impl<T: ?Sized, P> Clone for VirtualChildren<'_, T, P> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            predicate: self.predicate,
            frames: self.frames.clone(),
            direction: self.direction,
        }
    }
}

impl<T, P> Iterator for VirtualChildren<'_, T, P>
where
    T: Tree + ?Sized,
    P: InclusionPredicate<T>,
{
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let frame = self.frames.last_mut()?;
            if frame.front >= frame.back {
                self.frames.pop();
                continue;
            }
            let index = match self.direction {
                Direction::Forward => {
                    frame.front += 1;
                    frame.front - 1
                }
                Direction::Backward => {
                    frame.back -= 1;
                    frame.back
                }
            };
            let parent = frame.parent;

            let Some(child) = physical_at(self.tree, parent, index) else {
                continue;
            };
            if self.predicate.is_included(self.tree, child) {
                return Some(child);
            }
            self.frames.push(Frame::new(self.tree, Some(child)));
        }
    }
}

/// Pre-order sequence of every included node below a starting point
///
/// Unlike [`VirtualChildren`] this descends below included nodes. Clone it
/// before consuming to replay the same sequence.
pub struct SubForest<'a, T: Tree + ?Sized, P> {
    walk: PreOrder<'a, T>,
    predicate: &'a P,
}

impl<'a, T: Tree + ?Sized, P> SubForest<'a, T, P> {
    pub(crate) fn new(walk: PreOrder<'a, T>, predicate: &'a P) -> Self {
        Self { walk, predicate }
    }
}

impl<T: Tree + ?Sized, P> Clone for SubForest<'_, T, P> {
    fn clone(&self) -> Self {
        Self {
            walk: self.walk.clone(),
            predicate: self.predicate,
        }
    }
}

impl<T, P> Iterator for SubForest<'_, T, P>
where
    T: Tree + ?Sized,
    P: InclusionPredicate<T>,
{
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let tree = self.walk.tree();
        let predicate = self.predicate;
        self.walk.find(|&id| predicate.is_included(tree, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Everything;
    use crate::tree::{ArenaTree, Node};

    fn sample() -> ArenaTree<()> {
        ArenaTree::parse_outline("A(B(D,E),C),X(Y)").unwrap()
    }

    fn id(tree: &ArenaTree<()>, name: &str) -> NodeId {
        tree.find_by_name(name).unwrap()
    }

    #[test]
    fn test_physical_steps() {
        let tree = sample();
        let order: Vec<_> = ["A", "B", "D", "E", "C", "X", "Y"]
            .iter()
            .map(|n| id(&tree, n))
            .collect();

        for pair in order.windows(2) {
            assert_eq!(Direction::Forward.step(&tree, pair[0]), Some(pair[1]));
            assert_eq!(Direction::Backward.step(&tree, pair[1]), Some(pair[0]));
        }
        assert_eq!(Direction::Forward.step(&tree, id(&tree, "Y")), None);
        assert_eq!(Direction::Backward.step(&tree, id(&tree, "A")), None);
        assert_eq!(deepest_last(&tree, id(&tree, "A")), id(&tree, "C"));
    }

    #[test]
    fn test_scan_both_directions() {
        let tree = sample();
        let a = id(&tree, "A");
        let skip_b =
            |t: &ArenaTree<()>, n: NodeId| t.get(n).map(|n| n.name != "B").unwrap_or(false);

        let forward: Vec<_> =
            VirtualChildren::new(&tree, &skip_b, Some(a), Direction::Forward).collect();
        assert_eq!(forward, vec![id(&tree, "D"), id(&tree, "E"), id(&tree, "C")]);

        let backward: Vec<_> =
            VirtualChildren::new(&tree, &skip_b, Some(a), Direction::Backward).collect();
        assert_eq!(backward, vec![id(&tree, "C"), id(&tree, "E"), id(&tree, "D")]);
    }

    #[test]
    fn test_scan_over_roots() {
        let tree = sample();
        let roots: Vec<_> =
            VirtualChildren::new(&tree, &Everything, None, Direction::Forward).collect();
        assert_eq!(roots, vec![id(&tree, "A"), id(&tree, "X")]);
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        // Long chain of excluded nodes with a single included leaf at the bottom
        let mut tree = ArenaTree::new();
        let mut current = tree.add_root(Node::container("top", false));
        for _ in 0..100_000 {
            current = tree.add_child(current, Node::container("hidden", false));
        }
        let leaf = tree.add_child(current, Node::leaf("leaf", true));
        let top = tree.root_at(0).unwrap();

        let flagged = |t: &ArenaTree<bool>, n: NodeId| t.get(n).map(|n| n.data).unwrap_or(false);
        let found: Vec<_> =
            VirtualChildren::new(&tree, &flagged, Some(top), Direction::Forward).collect();
        assert_eq!(found, vec![leaf]);
    }
}
