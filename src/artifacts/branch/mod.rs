//! Branch names
//!
//! - `branch_name`: validated branch names

pub mod branch_name;

/// Branch that HEAD points to in a freshly initialized repository
pub const DEFAULT_BRANCH: &str = "main";

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\/\/|\.lock$|@\{|^@$|[\x00-\x20\*:\?\[\\~\^\x7f]";
