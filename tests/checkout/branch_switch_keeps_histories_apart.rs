use crate::common::command::{
    empty_repository_dir, get_parent_commit_id, read_branch, run_vcs_command, vcs_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn branch_switch_keeps_histories_apart(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = empty_repository_dir.path();

    write_file(FileSpec::new(dir.join("base.txt"), "base".to_string()));
    run_vcs_command(dir, &["add", "base.txt"]).assert().success();
    vcs_commit(dir, "base").assert().success();
    let base = read_branch(dir, "main").expect("main should have a commit");

    run_vcs_command(dir, &["branch", "feature"]).assert().success();
    run_vcs_command(dir, &["checkout", "feature"]).assert().success();

    write_file(FileSpec::new(dir.join("feature.txt"), "feature".to_string()));
    run_vcs_command(dir, &["add", "feature.txt"]).assert().success();
    vcs_commit(dir, "feature work")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[feature "));

    let feature = read_branch(dir, "feature").expect("feature should have a commit");
    assert_eq!(read_branch(dir, "main"), Some(base.clone()));
    assert_eq!(get_parent_commit_id(dir, &feature), Some(base.clone()));

    run_vcs_command(dir, &["checkout", "main"]).assert().success();
    run_vcs_command(dir, &["log", "--oneline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("feature work").not());

    Ok(())
}
