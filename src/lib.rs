//! A minimal content-addressed version control system
//!
//! - `areas`: on-disk components of a repository (object store, staging
//!   index, branch table, workspace, lock) and the [`areas::repository::Repository`]
//!   handle tying them together
//! - `artifacts`: the data types stored and exchanged by those components
//! - `commands`: user-facing operations, implemented on `Repository`
//! - `errors`: the error kinds callers can match on

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

/// Layout used by `log` to print each commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CommitDisplayFormat {
    #[default]
    Medium,
    #[value(name = "oneline")]
    OneLine,
}
