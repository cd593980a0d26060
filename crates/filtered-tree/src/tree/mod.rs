//! Physical tree abstraction
//!
//! The [`Tree`] trait is the capability set the filtered view walks. An
//! arena implementation, an outline notation for building small forests and
//! a filesystem loader are provided on top of it.

mod arena;
pub mod filesystem;
mod node;
mod notation;
mod traits;

pub use arena::ArenaTree;
pub use filesystem::{load_directory, FileData};
pub use node::{Node, NodeId, NodeKind};
pub(crate) use notation::{node_name, render};
pub use notation::outline;
pub use traits::{PreOrder, Tree};

/// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        load_directory, outline, ArenaTree, FileData, Node, NodeId, NodeKind, PreOrder, Tree,
    };
}
