//! Recursive tree listing
//!
//! - `walk_entry`: entries as yielded by the walk (path, id, contents)
//! - `tree_list`: lazy walk over a tree in ascending path order
//!
//! Directories are loaded only when the walk reaches them, so listing a
//! large tree never holds more than the current frontier in memory.

pub mod tree_list;
pub mod walk_entry;
