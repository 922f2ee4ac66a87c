//! Lazy, ordered traversal of a git repository's commit and tree graphs
//!
//! Both walks are pull-driven: nothing is loaded until the caller asks for
//! the next element, and everything a single expansion needs is fetched
//! concurrently. See [`artifacts::walk::OrderedWalk`] for the engine and
//! [`Repository`] for the on-disk entry point.

pub mod areas;
pub mod artifacts;
pub mod errors;

pub use areas::object_store::ObjectStore;
pub use areas::repository::Repository;
pub use artifacts::log::rev_list::{CommitNode, LogWalk, RevList};
pub use artifacts::revision::resolve;
pub use artifacts::tree_walk::tree_list::{TreeList, TreeWalk};
pub use artifacts::tree_walk::walk_entry::{Contents, WalkEntry};
pub use artifacts::walk::OrderedWalk;
pub use errors::{WalkError, WalkResult};
