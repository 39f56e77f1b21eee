use crate::common::command::{init_repository_dir, read_branch, run_vcs_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn init_twice_fails_with_already_initialized(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let head_before = read_branch(init_repository_dir.path(), "main");
    assert!(head_before.is_some());

    run_vcs_command(init_repository_dir.path(), &["init"])
        .assert()
        .code(3)
        .stderr(predicate::str::starts_with("error: repository already initialized"));

    // the existing history is untouched
    assert_eq!(read_branch(init_repository_dir.path(), "main"), head_before);

    Ok(())
}
