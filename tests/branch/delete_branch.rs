use crate::common::command::{init_repository_dir, read_branch, run_vcs_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn delete_branch(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = read_branch(dir, "main").expect("main should have a commit");

    run_vcs_command(dir, &["branch", "topic/cleanup"])
        .assert()
        .success();

    run_vcs_command(dir, &["branch", "-d", "topic/cleanup"])
        .assert()
        .success()
        .stdout(format!("Deleted branch topic/cleanup (was {})\n", &head[..7]));

    // the now empty parent directory is pruned
    assert!(!dir.join(".vcs").join("branches").join("topic").exists());

    Ok(())
}

#[rstest]
fn delete_current_branch_fails(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_vcs_command(dir, &["branch", "-d", "main"])
        .assert()
        .code(12)
        .stderr(predicate::str::contains("checked out"));

    assert!(read_branch(dir, "main").is_some());

    Ok(())
}

#[rstest]
fn delete_unknown_branch_fails(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_vcs_command(init_repository_dir.path(), &["branch", "-d", "ghost"])
        .assert()
        .code(6);

    Ok(())
}
