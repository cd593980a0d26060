//! Filtered (virtual) view over a physical tree
//!
//! A [`Navigator`] pairs an [`InclusionPredicate`] with read-only navigation
//! queries. The virtual tree is never materialized: every query walks the
//! relevant part of the physical tree again.

mod error;
mod navigator;
mod predicate;
mod scan;
mod typed;

pub use error::{NavError, Result};
pub use navigator::Navigator;
pub use predicate::{
    kind, node, And, Everything, InclusionPredicate, InclusionPredicateExt, Kind, MatchNode, Not,
    Or,
};
pub use scan::{SubForest, VirtualChildren};
pub use typed::{Downcast, TypeMatch, TypedIter, TypedNavigator, TypedNode};
