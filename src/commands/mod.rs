//! Command implementations, as methods on `Repository`
//!
//! - `plumbing`: low-level object commands (hash-object, cat-file)
//! - `porcelain`: user-facing workflow commands (init, add, commit, log, branch, checkout)

pub mod plumbing;
pub mod porcelain;
