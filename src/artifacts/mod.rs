//! Repository data structures and algorithms
//!
//! - `branch`: branch names and their validation
//! - `core`: shared output utilities (pager wrapper)
//! - `ignore`: ignore rules applied when staging
//! - `log`: commit history traversal
//! - `objects`: stored object types (blob, commit) and their digests

pub mod branch;
pub mod core;
pub mod ignore;
pub mod log;
pub mod objects;

