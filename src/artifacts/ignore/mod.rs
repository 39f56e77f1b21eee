//! Ignore rules for staging
//!
//! - `ignore_rules`: glob patterns loaded from the repository's ignore file

pub mod ignore_rules;

/// Name of the ignore file inside the repository directory
pub const IGNORE_FILE_NAME: &str = "ignore";
