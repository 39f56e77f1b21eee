use crate::common::command::{empty_repository_dir, init_repository_dir, read_branch, run_vcs_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case("feature")]
#[case("feature/login")]
#[case("release-1.0")]
#[case("fix_123")]
fn create_branch_with_valid_name(
    init_repository_dir: TempDir,
    #[case] branch_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_vcs_command(dir, &["branch", branch_name])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Created branch {}", branch_name)));

    assert_eq!(read_branch(dir, branch_name), read_branch(dir, "main"));

    Ok(())
}

#[rstest]
fn create_branch_without_commits(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();

    run_vcs_command(dir, &["branch", "feature"])
        .assert()
        .success();

    assert_eq!(read_branch(dir, "feature"), None);

    Ok(())
}
