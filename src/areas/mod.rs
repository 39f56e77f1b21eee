//! Core repository components
//!
//! - `database`: content store for blobs and commits
//! - `index`: staging area for the next commit
//! - `lock`: repository-wide lock for mutating operations
//! - `refs`: branch table and HEAD
//! - `repository`: repository handle tying the components together
//! - `workspace`: working tree file access

pub mod database;
pub mod index;
pub mod lock;
pub mod refs;
pub mod repository;
pub mod workspace;
