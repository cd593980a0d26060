//! Filtered Tree
//!
//! Read-only navigation over a filtered view of an ordered tree (or forest),
//! without building a second tree.
//!
//! # Core Concepts
//!
//! - **Tree**: capability set of the physical tree (parent, ordered children,
//!   ordered roots)
//! - **InclusionPredicate**: decides which physical nodes are part of the view
//! - **Navigator**: parent, children, siblings, document order and subtree
//!   enumeration, all in terms of the view
//! - **TypedNavigator**: a navigator over the nodes whose payload has a given
//!   runtime type
//!
//! # Example
//!
//! ```
//! use filtered_tree::prelude::*;
//!
//! let tree: ArenaTree<()> = ArenaTree::parse_outline("A(B(D,E),C)").unwrap();
//! let nav = Navigator::new(node(|n: &Node<()>| n.name != "E"));
//!
//! let d = tree.find_by_name("D").unwrap();
//! let c = tree.find_by_name("C").unwrap();
//! assert_eq!(nav.next(&tree, d).unwrap(), Some(c));
//! assert_eq!(nav.outline(&tree), "A(B(D),C)");
//! ```

pub mod filter;
pub mod tree;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::filter::{
        kind, node, Everything, InclusionPredicate, InclusionPredicateExt, NavError, Navigator,
        TypeMatch, TypedNavigator,
    };
    pub use crate::tree::prelude::*;
}
