//! Low-level object commands, mostly useful for scripting and debugging
//!
//! - `hash-object`: compute a file's blob digest and optionally store it
//! - `cat-file`: print a stored object

pub mod cat_file;
pub mod hash_object;
