//! Repository error kinds
//!
//! Library operations return `anyhow::Result`; the failures a caller may want
//! to react to are raised as [`VcsError`] values so they can be recovered with
//! `downcast_ref` (the binary uses this to pick a process exit code).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcsError {
    /// `init` was called on a directory that already holds a repository
    #[error("repository already initialized at {}", .0.display())]
    AlreadyInitialized(PathBuf),

    /// a path given to `add` does not exist
    #[error("file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    /// no object is stored under the given digest
    #[error("object {0} not found")]
    NotFound(String),

    #[error("branch {0} does not exist")]
    BranchNotFound(String),

    /// HEAD names a branch missing from the branch table
    #[error("HEAD points to branch {0} which does not exist")]
    NoActiveBranch(String),

    /// the repository lock is held by another invocation
    #[error("could not acquire repository lock {} within {} ms", .0.display(), .1)]
    LockTimeout(PathBuf, u64),

    #[error("branch {0} already exists")]
    BranchAlreadyExists(String),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("not a repository (or any parent up to {})", .0.display())]
    NotARepository(PathBuf),

    #[error("cannot delete branch {0} while it is checked out")]
    CannotDeleteCurrentBranch(String),
}

impl VcsError {
    /// Process exit code reported by the binary for this kind of failure
    pub fn exit_code(&self) -> i32 {
        match self {
            VcsError::AlreadyInitialized(_) => 3,
            VcsError::FileNotFound(_) => 4,
            VcsError::NotFound(_) => 5,
            VcsError::BranchNotFound(_) => 6,
            VcsError::NoActiveBranch(_) => 7,
            VcsError::LockTimeout(..) => 8,
            VcsError::BranchAlreadyExists(_) => 9,
            VcsError::InvalidBranchName(_) => 10,
            VcsError::NotARepository(_) => 11,
            VcsError::CannotDeleteCurrentBranch(_) => 12,
        }
    }

    /// Whether retrying the same operation may succeed
    pub fn is_retriable(&self) -> bool {
        matches!(self, VcsError::LockTimeout(..))
    }

    /// Follow-up advice printed by the binary after the error message
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            _ if self.is_retriable() => {
                Some("another command is holding the repository lock, retry once it finishes")
            }
            VcsError::NoActiveBranch(_) => {
                Some("HEAD names a missing branch, switch to an existing one with `vcs checkout <name>`")
            }
            _ => None,
        }
    }
}

/// Find the [`VcsError`] at the root of an `anyhow` error chain, if any
pub fn find_vcs_error(error: &anyhow::Error) -> Option<&VcsError> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<VcsError>())
}
