//! Property tests comparing the filtered view against a brute-force
//! reference computed from the full physical pre-order.

use filtered_tree::filter::{NavError, Navigator};
use filtered_tree::tree::{ArenaTree, Node, NodeId, Tree};
use proptest::prelude::*;
use proptest::sample::Index;

/// One entry per node: root roll (0 makes a new root), parent pick, included flag
type ForestShape = Vec<(u8, Index, bool)>;

fn forest_shape() -> impl Strategy<Value = ForestShape> {
    prop::collection::vec((0u8..6, any::<Index>(), any::<bool>()), 1..48)
}

fn build(shape: &ForestShape) -> ArenaTree<bool> {
    let mut tree = ArenaTree::new();
    for (i, (root_roll, parent, included)) in shape.iter().enumerate() {
        let node = Node::container(i.to_string(), *included);
        if i == 0 || *root_roll == 0 {
            tree.add_root(node);
        } else {
            tree.add_child(NodeId(parent.index(i)), node);
        }
    }
    tree
}

fn flagged(tree: &ArenaTree<bool>, id: NodeId) -> bool {
    tree.get(id).map(|n| n.data).unwrap_or(false)
}

fn navigator() -> Navigator<fn(&ArenaTree<bool>, NodeId) -> bool> {
    Navigator::new(flagged as fn(&ArenaTree<bool>, NodeId) -> bool)
}

/// Virtual structure computed the slow way
struct Reference {
    order: Vec<NodeId>,
    parents: Vec<(NodeId, Option<NodeId>)>,
}

impl Reference {
    fn new(tree: &ArenaTree<bool>) -> Self {
        let order: Vec<_> = tree.walk().filter(|&id| flagged(tree, id)).collect();
        let parents = order
            .iter()
            .map(|&id| {
                let parent = tree
                    .ancestors(id)
                    .into_iter()
                    .find(|&ancestor| flagged(tree, ancestor));
                (id, parent)
            })
            .collect();
        Self { order, parents }
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents
            .iter()
            .find(|(node, _)| *node == id)
            .and_then(|(_, parent)| *parent)
    }

    /// Virtual children of `parent` (`None` for the virtual roots), in order
    fn children(&self, parent: Option<NodeId>) -> Vec<NodeId> {
        self.parents
            .iter()
            .filter(|(_, p)| *p == parent)
            .map(|(node, _)| *node)
            .collect()
    }
}

proptest! {
    #[test]
    fn document_order_matches_preorder(shape in forest_shape()) {
        let tree = build(&shape);
        let nav = navigator();
        let reference = Reference::new(&tree);

        let mut forward = Vec::new();
        let mut current = nav.first(&tree);
        while let Some(id) = current {
            forward.push(id);
            current = nav.next(&tree, id).unwrap();
        }
        prop_assert_eq!(&forward, &reference.order);

        let mut backward = Vec::new();
        let mut current = nav.last(&tree);
        while let Some(id) = current {
            backward.push(id);
            current = nav.previous(&tree, id).unwrap();
        }
        backward.reverse();
        prop_assert_eq!(&backward, &reference.order);
    }

    #[test]
    fn next_and_previous_are_symmetric(shape in forest_shape()) {
        let tree = build(&shape);
        let nav = navigator();

        for id in nav.iter(&tree) {
            if let Some(next) = nav.next(&tree, id).unwrap() {
                prop_assert_eq!(nav.previous(&tree, next).unwrap(), Some(id));
            }
            if let Some(previous) = nav.previous(&tree, id).unwrap() {
                prop_assert_eq!(nav.next(&tree, previous).unwrap(), Some(id));
            }
        }
    }

    #[test]
    fn parent_and_children_are_consistent(shape in forest_shape()) {
        let tree = build(&shape);
        let nav = navigator();
        let reference = Reference::new(&tree);

        for &id in &reference.order {
            let parent = nav.parent(&tree, id).unwrap();
            prop_assert_eq!(parent, reference.parent(id));

            match parent {
                Some(parent) => {
                    let index = nav.index_of(&tree, id).unwrap().unwrap();
                    prop_assert!(index < nav.child_count(&tree, parent).unwrap());
                    prop_assert_eq!(nav.child(&tree, parent, index).unwrap(), id);
                }
                None => {
                    prop_assert_eq!(nav.index_of(&tree, id).unwrap(), None);
                }
            }

            let children: Vec<_> = nav.children(&tree, id).unwrap().collect();
            prop_assert_eq!(children, reference.children(Some(id)));
        }

        let roots: Vec<_> = nav.roots(&tree).collect();
        prop_assert_eq!(roots, reference.children(None));
    }

    #[test]
    fn siblings_follow_the_virtual_child_lists(shape in forest_shape()) {
        let tree = build(&shape);
        let nav = navigator();
        let reference = Reference::new(&tree);

        for &id in &reference.order {
            let siblings = reference.children(reference.parent(id));
            let position = siblings.iter().position(|&s| s == id).unwrap();
            let expected_previous = position.checked_sub(1).map(|i| siblings[i]);
            let expected_next = siblings.get(position + 1).copied();

            let previous = nav.previous_sibling(&tree, id).unwrap();
            let next = nav.next_sibling(&tree, id).unwrap();
            prop_assert_eq!(previous, expected_previous);
            prop_assert_eq!(next, expected_next);

            if let Some(previous) = previous {
                prop_assert_eq!(nav.next_sibling(&tree, previous).unwrap(), Some(id));
            }
            if let Some(next) = next {
                prop_assert_eq!(nav.previous_sibling(&tree, next).unwrap(), Some(id));
            }
        }
    }

    #[test]
    fn subforest_is_complete(shape in forest_shape()) {
        let tree = build(&shape);
        let nav = navigator();

        for index in 0..tree.node_count() {
            let start = NodeId(index);
            let expected: Vec<_> = tree.walk_from(start).filter(|&id| flagged(&tree, id)).collect();
            let lazy = nav.subforest(&tree, start).unwrap();
            let eager: Vec<_> = lazy.clone().collect();
            prop_assert_eq!(&eager, &expected);
            prop_assert_eq!(lazy.collect::<Vec<_>>(), expected);
        }
    }

    #[test]
    fn excluded_nodes_are_rejected(shape in forest_shape()) {
        let tree = build(&shape);
        let nav = navigator();

        for index in 0..tree.node_count() {
            let id = NodeId(index);
            if !flagged(&tree, id) {
                prop_assert_eq!(nav.child_count(&tree, id), Err(NavError::NodeNotIncluded(id)));
                prop_assert_eq!(nav.next(&tree, id), Err(NavError::NodeNotIncluded(id)));
            }
        }
        let outside = NodeId(tree.node_count());
        prop_assert_eq!(nav.parent(&tree, outside), Err(NavError::NullArgument(outside)));
    }

    #[test]
    fn queries_are_idempotent(shape in forest_shape()) {
        let tree = build(&shape);
        let nav = navigator();
        prop_assert_eq!(nav.outline(&tree), nav.outline(&tree));
        let first: Vec<_> = nav.iter(&tree).collect();
        let second: Vec<_> = nav.iter(&tree).collect();
        prop_assert_eq!(first, second);
    }
}
