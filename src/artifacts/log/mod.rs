//! Commit history traversal
//!
//! - `rev_list`: lazy walk along parent links, newest commit first

pub mod rev_list;
