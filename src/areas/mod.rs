//! Repository-facing components
//!
//! - `object_store`: the interface walkers load objects and refs through
//! - `database`: loose object reader
//! - `refs`: reference reader (branches, HEAD, tags, shallow)
//! - `repository`: on-disk repository implementing `ObjectStore`

pub mod database;
pub mod object_store;
pub mod refs;
pub mod repository;
