//! Inclusion predicates deciding membership of the filtered view

use crate::tree::{Node, NodeId, NodeKind, Tree};
use std::marker::PhantomData;

/// Decides whether a physical node is part of the filtered view
///
/// Implementations must be total and side-effect free, and must answer the
/// same way for the same node for as long as one traversal runs. The
/// navigator cannot check this; a predicate that changes its mind produces
/// inconsistent shapes between calls (never a panic).
///
/// Any `Fn(&T, NodeId) -> bool` closure is a predicate.
pub trait InclusionPredicate<T: Tree + ?Sized> {
    fn is_included(&self, tree: &T, id: NodeId) -> bool;
}

impl<T, F> InclusionPredicate<T> for F
where
    T: Tree + ?Sized,
    F: Fn(&T, NodeId) -> bool,
{
    fn is_included(&self, tree: &T, id: NodeId) -> bool {
        self(tree, id)
    }
}

/// Includes every node
#[derive(Debug, Clone, Copy, Default)]
pub struct Everything;

impl<T: Tree + ?Sized> InclusionPredicate<T> for Everything {
    fn is_included(&self, _tree: &T, _id: NodeId) -> bool {
        true
    }
}

/// Predicate over the node payload, see [`node`]
pub struct MatchNode<D, F> {
    f: F,
    _data: PhantomData<fn(&D)>,
}

/// Build a predicate from a test on the node payload
///
/// ```
/// use filtered_tree::filter::node;
/// use filtered_tree::tree::Node;
///
/// let not_e = node(|n: &Node<()>| n.name != "E");
/// # let _ = not_e;
/// ```
pub fn node<D, F>(f: F) -> MatchNode<D, F>
where
    F: Fn(&Node<D>) -> bool,
{
    MatchNode {
        f,
        _data: PhantomData,
    }
}

impl<T, F> InclusionPredicate<T> for MatchNode<T::NodeData, F>
where
    T: Tree + ?Sized,
    F: Fn(&Node<T::NodeData>) -> bool,
{
    fn is_included(&self, tree: &T, id: NodeId) -> bool {
        tree.get(id).map(&self.f).unwrap_or(false)
    }
}

/// Includes nodes of one [`NodeKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kind(pub NodeKind);

/// Shorthand for [`Kind`]
pub fn kind(kind: NodeKind) -> Kind {
    Kind(kind)
}

impl<T: Tree + ?Sized> InclusionPredicate<T> for Kind {
    fn is_included(&self, tree: &T, id: NodeId) -> bool {
        tree.get(id).map(|n| n.kind == self.0).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Not<P>(pub P);

impl<T: Tree + ?Sized, P: InclusionPredicate<T>> InclusionPredicate<T> for Not<P> {
    fn is_included(&self, tree: &T, id: NodeId) -> bool {
        !self.0.is_included(tree, id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct And<P, Q>(pub P, pub Q);

impl<T, P, Q> InclusionPredicate<T> for And<P, Q>
where
    T: Tree + ?Sized,
    P: InclusionPredicate<T>,
    Q: InclusionPredicate<T>,
{
    fn is_included(&self, tree: &T, id: NodeId) -> bool {
        self.0.is_included(tree, id) && self.1.is_included(tree, id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Or<P, Q>(pub P, pub Q);

impl<T, P, Q> InclusionPredicate<T> for Or<P, Q>
where
    T: Tree + ?Sized,
    P: InclusionPredicate<T>,
    Q: InclusionPredicate<T>,
{
    fn is_included(&self, tree: &T, id: NodeId) -> bool {
        self.0.is_included(tree, id) || self.1.is_included(tree, id)
    }
}

/// Combinators on the predicate types of this crate
///
/// Closures are combined by wrapping them directly, e.g. `Not(f)` or
/// `And(f, g)`. The methods are not offered on unrelated types:
///
/// ```compile_fail
/// use filtered_tree::prelude::*;
///
/// let _ = true.and(false);
/// ```
pub trait InclusionPredicateExt: Sized {
    fn negate(self) -> Not<Self> {
        Not(self)
    }

    fn and<Q>(self, other: Q) -> And<Self, Q> {
        And(self, other)
    }

    fn or<Q>(self, other: Q) -> Or<Self, Q> {
        Or(self, other)
    }
}

impl InclusionPredicateExt for Everything {}
impl InclusionPredicateExt for Kind {}
impl<D, F> InclusionPredicateExt for MatchNode<D, F> {}
impl<P> InclusionPredicateExt for Not<P> {}
impl<P, Q> InclusionPredicateExt for And<P, Q> {}
impl<P, Q> InclusionPredicateExt for Or<P, Q> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ArenaTree;

    fn sample() -> ArenaTree<()> {
        ArenaTree::parse_outline("A(B(D,E),C)").unwrap()
    }

    #[test]
    fn test_closure_predicate() {
        let tree = sample();
        let e = tree.find_by_name("E").unwrap();
        let skip_e = move |_: &ArenaTree<()>, id: NodeId| id != e;

        assert!(!skip_e.is_included(&tree, e));
        assert!(skip_e.is_included(&tree, tree.find_by_name("D").unwrap()));
    }

    #[test]
    fn test_node_and_kind_predicates() {
        let tree = sample();
        let a = tree.find_by_name("A").unwrap();
        let d = tree.find_by_name("D").unwrap();

        let leaves = kind(NodeKind::Leaf);
        assert!(leaves.is_included(&tree, d));
        assert!(!leaves.is_included(&tree, a));

        let named_a = node(|n: &Node<()>| n.name == "A");
        assert!(named_a.is_included(&tree, a));
        assert!(!named_a.is_included(&tree, NodeId(99)));
    }

    #[test]
    fn test_combinators() {
        let tree = sample();
        let a = tree.find_by_name("A").unwrap();
        let b = tree.find_by_name("B").unwrap();
        let c = tree.find_by_name("C").unwrap();

        let containers = kind(NodeKind::Container);
        let not_b = node(|n: &Node<()>| n.name != "B");

        let p = containers.and(not_b);
        assert!(p.is_included(&tree, a));
        assert!(!p.is_included(&tree, b));

        let q = containers.negate().or(Everything.negate());
        assert!(q.is_included(&tree, c));
        assert!(!q.is_included(&tree, a));
    }

    #[test]
    fn test_wrapping_closures() {
        let tree = sample();
        let a = tree.find_by_name("A").unwrap();
        let e = tree.find_by_name("E").unwrap();
        let is_a = move |_: &ArenaTree<()>, id: NodeId| id == a;
        let is_e = move |_: &ArenaTree<()>, id: NodeId| id == e;

        let either = Or(is_a, is_e);
        assert!(either.is_included(&tree, a));
        assert!(either.is_included(&tree, e));

        let neither = Not(either).and(kind(NodeKind::Leaf));
        assert!(neither.is_included(&tree, tree.find_by_name("D").unwrap()));
        assert!(!neither.is_included(&tree, e));
    }
}
