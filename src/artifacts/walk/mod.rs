//! Generic ordered graph traversal
//!
//! - `ordered_walk`: the pull-driven walk engine shared by the history and
//!   tree walkers

pub mod ordered_walk;

pub use ordered_walk::OrderedWalk;
