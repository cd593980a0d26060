//! Filtering by the runtime type of node payloads

use crate::filter::scan::{SubForest, VirtualChildren};
use crate::filter::{InclusionPredicate, InclusionPredicateExt, NavError, Navigator, Result};
use crate::tree::{NodeId, Tree};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

/// Payloads whose concrete type can be inspected at runtime
pub trait Downcast {
    fn as_any(&self) -> &dyn Any;
}

impl Downcast for Box<dyn Any> {
    fn as_any(&self) -> &dyn Any {
        &**self
    }
}

impl Downcast for Box<dyn Any + Send + Sync> {
    fn as_any(&self) -> &dyn Any {
        &**self
    }
}

/// Includes nodes whose payload is a `U`
pub struct TypeMatch<U> {
    _target: PhantomData<fn() -> U>,
}

impl<U: Any> TypeMatch<U> {
    pub fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<U: Any> Default for TypeMatch<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> Clone for TypeMatch<U> {
    fn clone(&self) -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<U> Copy for TypeMatch<U> {}

impl<U> fmt::Debug for TypeMatch<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeMatch<{}>", std::any::type_name::<U>())
    }
}

impl<T, U> InclusionPredicate<T> for TypeMatch<U>
where
    T: Tree + ?Sized,
    T::NodeData: Downcast,
    U: Any,
{
    fn is_included(&self, tree: &T, id: NodeId) -> bool {
        tree.get(id)
            .map(|n| n.data.as_any().is::<U>())
            .unwrap_or(false)
    }
}

impl<U> InclusionPredicateExt for TypeMatch<U> {}

/// A node of the typed view together with its narrowed payload
///
/// Equality is node identity.
pub struct TypedNode<'t, U> {
    pub id: NodeId,
    pub value: &'t U,
}

impl<U> fmt::Debug for TypedNode<'_, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedNode")
            .field("id", &self.id)
            .field("type", &std::any::type_name::<U>())
            .finish()
    }
}

impl<U> Clone for TypedNode<'_, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for TypedNode<'_, U> {}

impl<U> PartialEq for TypedNode<'_, U> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<U> Eq for TypedNode<'_, U> {}

/// Navigator over the nodes whose payload is a `U`
///
/// Every result is narrowed with a checked downcast. Only matching nodes can
/// come out of the underlying navigator, so the check never fails on a tree
/// that is not mutated mid-call.
///
/// # Example
///
/// ```
/// use std::any::Any;
/// use filtered_tree::filter::TypedNavigator;
/// use filtered_tree::tree::{ArenaTree, Node, Tree};
///
/// struct Heading(u8);
///
/// let mut tree: ArenaTree<Box<dyn Any>> = ArenaTree::new();
/// let doc = tree.add_root(Node::container("doc", Box::new(Heading(1)) as Box<dyn Any>));
/// let body = tree.add_child(doc, Node::container("body", Box::new("text") as Box<dyn Any>));
/// let sub = tree.add_child(body, Node::leaf("sub", Box::new(Heading(2)) as Box<dyn Any>));
///
/// let headings = TypedNavigator::<Heading>::new();
/// let child = headings.child(&tree, doc, 0).unwrap();
/// assert_eq!(child.id, sub);
/// assert_eq!(child.value.0, 2);
/// ```
pub struct TypedNavigator<U> {
    inner: Navigator<TypeMatch<U>>,
}

impl<U: Any> Default for TypedNavigator<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> fmt::Debug for TypedNavigator<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedNavigator")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<U: Any> TypedNavigator<U> {
    pub fn new() -> Self {
        Self {
            inner: Navigator::new(TypeMatch::new()),
        }
    }

    /// The untyped navigator this one narrows
    pub fn untyped(&self) -> &Navigator<TypeMatch<U>> {
        &self.inner
    }

    /// Checked narrowing of a node to the target type
    pub fn narrow<'t, T>(&self, tree: &'t T, id: NodeId) -> Result<TypedNode<'t, U>>
    where
        T: Tree + ?Sized,
        T::NodeData: Downcast,
    {
        let node = tree.get(id).ok_or(NavError::NullArgument(id))?;
        node.data
            .as_any()
            .downcast_ref::<U>()
            .map(|value| TypedNode { id, value })
            .ok_or(NavError::NodeNotIncluded(id))
    }

    fn narrow_opt<'t, T>(
        &self,
        tree: &'t T,
        id: Option<NodeId>,
    ) -> Result<Option<TypedNode<'t, U>>>
    where
        T: Tree + ?Sized,
        T::NodeData: Downcast,
    {
        id.map(|id| self.narrow(tree, id)).transpose()
    }

    /// Nearest ancestor whose payload is a `U`
    pub fn parent<'t, T>(&self, tree: &'t T, id: NodeId) -> Result<Option<TypedNode<'t, U>>>
    where
        T: Tree + ?Sized,
        T::NodeData: Downcast,
    {
        let parent = self.inner.parent(tree, id)?;
        self.narrow_opt(tree, parent)
    }

    pub fn child_count<T>(&self, tree: &T, id: NodeId) -> Result<usize>
    where
        T: Tree + ?Sized,
        T::NodeData: Downcast,
    {
        self.inner.child_count(tree, id)
    }

    pub fn child<'t, T>(&self, tree: &'t T, id: NodeId, index: usize) -> Result<TypedNode<'t, U>>
    where
        T: Tree + ?Sized,
        T::NodeData: Downcast,
    {
        let child = self.inner.child(tree, id, index)?;
        self.narrow(tree, child)
    }

    pub fn children<'t, T>(
        &'t self,
        tree: &'t T,
        id: NodeId,
    ) -> Result<TypedIter<'t, T, U, VirtualChildren<'t, T, TypeMatch<U>>>>
    where
        T: Tree + ?Sized,
        T::NodeData: Downcast,
    {
        Ok(TypedIter::new(tree, self.inner.children(tree, id)?))
    }

    pub fn index_of<T>(&self, tree: &T, id: NodeId) -> Result<Option<usize>>
    where
        T: Tree + ?Sized,
        T::NodeData: Downcast,
    {
        self.inner.index_of(tree, id)
    }

    pub fn previous_sibling<'t, T>(
        &self,
        tree: &'t T,
        id: NodeId,
    ) -> Result<Option<TypedNode<'t, U>>>
    where
        T: Tree + ?Sized,
        T::NodeData: Downcast,
    {
        let sibling = self.inner.previous_sibling(tree, id)?;
        self.narrow_opt(tree, sibling)
    }

    pub fn next_sibling<'t, T>(
        &self,
        tree: &'t T,
        id: NodeId,
    ) -> Result<Option<TypedNode<'t, U>>>
    where
        T: Tree + ?Sized,
        T::NodeData: Downcast,
    {
        let sibling = self.inner.next_sibling(tree, id)?;
        self.narrow_opt(tree, sibling)
    }

    pub fn previous<'t, T>(&self, tree: &'t T, id: NodeId) -> Result<Option<TypedNode<'t, U>>>
    where
        T: Tree + ?Sized,
        T::NodeData: Downcast,
    {
        let previous = self.inner.previous(tree, id)?;
        self.narrow_opt(tree, previous)
    }

    pub fn next<'t, T>(&self, tree: &'t T, id: NodeId) -> Result<Option<TypedNode<'t, U>>>
    where
        T: Tree + ?Sized,
        T::NodeData: Downcast,
    {
        let next = self.inner.next(tree, id)?;
        self.narrow_opt(tree, next)
    }

    /// Every `U` node of the physical subtree rooted at `id`, in pre-order
    pub fn subforest<'t, T>(
        &'t self,
        tree: &'t T,
        id: NodeId,
    ) -> Result<TypedIter<'t, T, U, SubForest<'t, T, TypeMatch<U>>>>
    where
        T: Tree + ?Sized,
        T::NodeData: Downcast,
    {
        Ok(TypedIter::new(tree, self.inner.subforest(tree, id)?))
    }
}

/// Narrowing adapter over the untyped scans
pub struct TypedIter<'t, T: ?Sized, U, I> {
    tree: &'t T,
    inner: I,
    _target: PhantomData<fn() -> U>,
}

impl<'t, T: ?Sized, U, I> TypedIter<'t, T, U, I> {
    fn new(tree: &'t T, inner: I) -> Self {
        Self {
            tree,
            inner,
            _target: PhantomData,
        }
    }
}

impl<'t, T, U, I> Iterator for TypedIter<'t, T, U, I>
where
    T: Tree + ?Sized,
    T::NodeData: Downcast,
    U: Any,
    I: Iterator<Item = NodeId>,
{
    type Item = TypedNode<'t, U>;

    fn next(&mut self) -> Option<TypedNode<'t, U>> {
        let tree = self.tree;
        self.inner.find_map(|id| {
            let value = tree.get(id)?.data.as_any().downcast_ref::<U>()?;
            Some(TypedNode { id, value })
        })
    }
}
