//! Git data structures and algorithms
//!
//! This module contains the core Git types and algorithms:
//!
//! - `log`: Commit history traversal
//! - `objects`: Git object types (blob, tree, commit)
//! - `revision`: Resolving names to object ids
//! - `tree_walk`: Recursive tree listing
//! - `walk`: The ordered walk both traversals are built on

pub mod log;
pub mod objects;
pub mod revision;
pub mod tree_walk;
pub mod walk;
