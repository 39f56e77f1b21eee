//! User-facing commands
//!
//! - `init`: create an empty repository
//! - `add`: stage files for commit
//! - `commit`: record the staged files on the active branch
//! - `log`: show the history of a branch
//! - `branch`: create, list or delete branches
//! - `checkout`: switch the active branch

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
