//! Commit history traversal for git log
//!
//! - `rev_list`: lazy walk over every commit reachable from a revision
//!
//! ## Algorithm
//!
//! History is an instance of the generic ordered walk: parents are scanned
//! from each emitted commit, loaded concurrently, and emitted by descending
//! author date. Commits reachable through several merges are only visited
//! once, and a shallow boundary stops the walk at the last fetched commit.
//!
//! With parents never dated after their children the output is strictly
//! newest-first. Clock skew can produce a locally unordered (but still
//! deterministic) sequence, as with `git log` itself.

pub mod rev_list;
