//! Git object types (read side)
//!
//! Git stores all content as objects identified by SHA-1 hashes:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Commit**: Snapshot with metadata (author, message, parent commits, tree)
//! - **Tag**: Annotated tag pointing at another object, usually a commit
//!
//! Loose objects on disk use the format `<type> <size>\0<content>`.
//! This crate only ever reads objects; producing them is left to other tools.

pub mod commit;
pub mod database_entry;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tag;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
